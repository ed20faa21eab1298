use std::thread;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::config::FeedConfig;
use crate::domain::{NumberingMode, SourceRecord};
use crate::error::FeedError;
use crate::numbering::{EntropySource, NumberSource, Numberer};
use crate::source::SourceClient;
use crate::store;
use crate::transform::transform;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub source_url: String,
    pub output_path: String,
    pub fetched: usize,
    pub written: usize,
    pub skipped: usize,
    pub generated_at: String,
}

pub struct Pipeline<S: SourceClient> {
    client: S,
    config: FeedConfig,
    entropy: Box<dyn NumberSource>,
}

impl<S: SourceClient> Pipeline<S> {
    pub fn new(client: S, config: FeedConfig) -> Self {
        Self::with_entropy(client, config, Box::new(EntropySource))
    }

    pub fn with_entropy(client: S, config: FeedConfig, entropy: Box<dyn NumberSource>) -> Self {
        Self {
            client,
            config,
            entropy,
        }
    }

    pub fn run_once(&mut self) -> Result<RunSummary, FeedError> {
        let value = self.client.fetch_json(&self.config.source_url)?;
        let records = parse_records(value)?;

        let mut numberer = match self.config.numbering {
            NumberingMode::Stable => Numberer::stable(),
            NumberingMode::Random => Numberer::random(&mut *self.entropy),
        };
        let channels = transform(&records, &self.config.profile, &mut numberer)?;

        store::write_channels(&self.config.output_path, &channels)?;

        Ok(RunSummary {
            source_url: self.config.source_url.clone(),
            output_path: self.config.output_path.to_string(),
            fetched: records.len(),
            written: channels.len(),
            skipped: records.len() - channels.len(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn run_forever(&mut self, interval: Duration) -> ! {
        loop {
            match self.run_once() {
                Ok(summary) => {
                    info!(
                        "wrote {} channels to {} ({} skipped)",
                        summary.written, summary.output_path, summary.skipped
                    );
                }
                Err(err) => {
                    error!("refresh failed: {err}");
                }
            }
            thread::sleep(interval);
        }
    }
}

fn parse_records(value: Value) -> Result<Vec<SourceRecord>, FeedError> {
    if !value.is_array() {
        return Err(FeedError::UnexpectedPayload(
            "source payload is not an array".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|err| FeedError::UnexpectedPayload(err.to_string()))
}
