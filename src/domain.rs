use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::numbering::ChannelNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NumberingMode {
    Stable,
    Random,
}

impl fmt::Display for NumberingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberingMode::Stable => write!(f, "stable"),
            NumberingMode::Random => write!(f, "random"),
        }
    }
}

impl FromStr for NumberingMode {
    type Err = FeedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "stable" => Ok(NumberingMode::Stable),
            "random" => Ok(NumberingMode::Random),
            _ => Err(FeedError::InvalidNumberingMode(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl SourceRecord {
    pub fn display_name(&self) -> String {
        let raw = self
            .name
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| self.id.as_deref().filter(|value| !value.is_empty()))
            .unwrap_or("Unknown");
        raw.trim().to_string()
    }

    pub fn playable_link(&self) -> Option<String> {
        let link = self.link.as_deref().unwrap_or("").trim();
        if link.is_empty() {
            return None;
        }
        Some(link.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    pub channel_number: ChannelNumber,
    pub platform: String,
    pub link_type: String,
    pub channel_name: String,
    pub sub_text: String,
    pub start_time: String,
    pub owner_info: String,
    pub channel_url: String,
    pub thumbnail: String,
}

impl ChannelRecord {
    pub fn renamed(&self, channel_name: &str) -> ChannelRecord {
        ChannelRecord {
            channel_name: channel_name.to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRule {
    pub match_name: String,
    pub replacement_name: String,
}
