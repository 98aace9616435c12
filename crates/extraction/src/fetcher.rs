//! Documentation page fetcher
//!
//! One pooled `reqwest::Client` per extractor with a fixed User-Agent and
//! a hard per-request timeout. Fetch failures (network errors, non-2xx
//! statuses, timeouts) are reported as errors for the pipeline to log and
//! skip; nothing here retries except the browser profile, which makes up
//! to a fixed number of attempts per URL to get past bot-blocking.

use cdpbot_common::config::FetcherConfig;
use cdpbot_common::errors::{AppError, Result};
use cdpbot_common::metrics;
use cdpbot_common::model::Platform;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, REFERER};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP fetcher for vendor documentation pages
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    platform: Platform,
    max_attempts: u32,
}

impl Fetcher {
    /// Plain fetcher: fixed User-Agent, single attempt per URL
    pub fn new(config: &FetcherConfig, platform: Platform) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Internal {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            platform,
            max_attempts: 1,
        })
    }

    /// Browser-profile fetcher: extended header set and multiple attempts
    /// per URL, for documentation sites that block plain clients
    pub fn browser(config: &FetcherConfig, platform: Platform) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Internal {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            platform,
            max_attempts: config.max_attempts.max(1),
        })
    }

    /// Fetch a page, returning its raw HTML
    pub async fn fetch(&self, url: &str) -> Result<String> {
        Url::parse(url).map_err(|e| AppError::Fetch {
            url: url.to_string(),
            message: format!("invalid URL: {e}"),
        })?;

        let mut last_error = None;
        for attempt in 1..=self.max_attempts {
            match self.try_fetch(url).await {
                Ok(body) => {
                    metrics::record_fetch(self.platform.as_str(), true);
                    debug!(url, attempt, "Fetched page");
                    return Ok(body);
                }
                Err(e) => {
                    if attempt < self.max_attempts {
                        warn!(url, attempt, error = %e, "Fetch attempt failed, retrying");
                    }
                    last_error = Some(e);
                }
            }
        }

        metrics::record_fetch(self.platform.as_str(), false);
        Err(last_error.unwrap_or_else(|| AppError::Fetch {
            url: url.to_string(),
            message: "no fetch attempts were made".to_string(),
        }))
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let response = response.error_for_status().map_err(|e| AppError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        response.text().await.map_err(|e| AppError::Fetch {
            url: url.to_string(),
            message: format!("failed to read body: {e}"),
        })
    }
}
