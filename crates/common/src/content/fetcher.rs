//! HTTP page fetching
//!
//! One GET per page with a browser-like User-Agent. No retries.

use crate::config::ScraperConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Trait for retrieving raw page HTML
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the HTML body of `url`
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// reqwest-backed fetcher
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher from scraper configuration
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching page");

        let response = self.client.get(url).send().await.map_err(|e| AppError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await.map_err(|e| AppError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        debug!(url = %url, bytes = html.len(), "Page fetched");
        Ok(html)
    }
}
