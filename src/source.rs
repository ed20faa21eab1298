use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::error::FeedError;

pub trait SourceClient: Send + Sync {
    fn fetch_json(&self, url: &str) -> Result<Value, FeedError>;
}

#[derive(Clone)]
pub struct SourceHttpClient {
    client: Client,
}

impl SourceHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("crichd-feed/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| FeedError::SourceHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| FeedError::SourceHttp(err.to_string()))?;
        Ok(Self { client })
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, FeedError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "source request failed".to_string());
        Err(FeedError::SourceStatus { status, message })
    }
}

impl SourceClient for SourceHttpClient {
    fn fetch_json(&self, url: &str) -> Result<Value, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| FeedError::SourceHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        let body = response
            .text()
            .map_err(|err| FeedError::SourceHttp(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| FeedError::InvalidJson(err.to_string()))
    }
}
