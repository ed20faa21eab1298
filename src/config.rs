use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::domain::NumberingMode;
use crate::error::FeedError;

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/abusaeeidx/CricHd-playlists-Auto-Update-permanent/main/api.json";
pub const DEFAULT_OUTPUT_FILE: &str = "auto_fetch_crichd_api.json";
pub const DEFAULT_THUMBNAIL_URL: &str =
    "https://gitlab.com/ranginfotech89/ipl_data_api/-/raw/main/stream_categories/cricket_league_vectors/all_live_streaming.png";
pub const DEFAULT_SELECT_SOURCE: &str =
    "https://raw.githubusercontent.com/jitupatel2506/crichd-auto-fetch/refs/heads/main/crichd-auto-fetch/auto_fetch_crichd_api.json";
pub const DEFAULT_SELECT_OUTPUT: &str = "auto_crichd_selected_api.json";

pub const SOURCE_URL_ENV: &str = "CRICHD_SOURCE_URL";
pub const OUTPUT_FILE_ENV: &str = "OUTPUT_FILE";
pub const THUMBNAIL_URL_ENV: &str = "THUMBNAIL_URL";
pub const NUMBERING_ENV: &str = "CHANNEL_NUMBERING";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INTERVAL_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedProfile {
    pub platform: String,
    pub link_type: String,
    pub sub_text: String,
    pub owner_info: String,
    pub thumbnail: String,
}

impl Default for FeedProfile {
    fn default() -> Self {
        Self {
            platform: "CricHD".to_string(),
            link_type: "app".to_string(),
            sub_text: "Live Streaming Now".to_string(),
            owner_info: "Stream provided by public source".to_string(),
            thumbnail: DEFAULT_THUMBNAIL_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub source_url: String,
    pub output_path: Utf8PathBuf,
    pub numbering: NumberingMode,
    pub profile: FeedProfile,
}

impl FeedConfig {
    pub fn from_env() -> Result<Self, FeedError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, FeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_url = lookup(SOURCE_URL_ENV).unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        let output_path = lookup(OUTPUT_FILE_ENV)
            .map(Utf8PathBuf::from)
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_FILE));
        let numbering = match lookup(NUMBERING_ENV) {
            Some(value) => value.parse()?,
            None => NumberingMode::Stable,
        };

        let mut profile = FeedProfile::default();
        if let Some(thumbnail) = lookup(THUMBNAIL_URL_ENV) {
            profile.thumbnail = thumbnail;
        }

        Ok(Self {
            source_url,
            output_path,
            numbering,
            profile,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    #[serde(default = "default_select_source")]
    pub source: String,
    #[serde(default = "default_select_output")]
    pub output: String,
    #[serde(default)]
    pub selected_channels: Vec<String>,
    #[serde(default)]
    pub replacement_names: Vec<String>,
}

impl SelectionConfig {
    pub fn load(path: &Utf8Path) -> Result<Self, FeedError> {
        let content = fs::read_to_string(path.as_std_path())
            .map_err(|_| FeedError::RulesRead(path.to_owned()))?;
        let config: SelectionConfig =
            serde_json::from_str(&content).map_err(|err| FeedError::RulesParse(err.to_string()))?;
        Ok(config)
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            source: default_select_source(),
            output: default_select_output(),
            selected_channels: Vec::new(),
            replacement_names: Vec::new(),
        }
    }
}

fn default_select_source() -> String {
    DEFAULT_SELECT_SOURCE.to_string()
}

fn default_select_output() -> String {
    DEFAULT_SELECT_OUTPUT.to_string()
}
