//! HTTP client for the public job-search results page.

mod transport;

use std::time::Duration;

use jobscout_core::ScraperConfig;
use reqwest::{Client, StatusCode};

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

use transport::TransportRetry;

/// Fetches search result pages as HTML.
///
/// Two retry layers wrap every GET:
///
/// 1. Connection level: connect/timeout failures and 429/500/502/503/504 are
///    retried up to `transport_max_retries` times with a short backoff.
/// 2. Application level: up to `max_attempts` attempts; a 429 that survives
///    the connection level waits `backoff_base_secs * 2^attempt` before the
///    next attempt, any other failure retries immediately.
///
/// Requests carry only the configured `User-Agent`; no cookies are kept.
pub struct JobSearchClient {
    client: Client,
    transport: TransportRetry,
    max_attempts: u32,
    backoff_base_secs: u64,
}

impl JobSearchClient {
    /// Creates a `JobSearchClient` from the scraper settings.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config or header value).
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            transport: TransportRetry::new(
                config.transport_max_retries,
                config.transport_backoff_factor_ms,
            ),
            max_attempts: config.max_attempts,
            backoff_base_secs: config.backoff_base_secs,
        })
    }

    /// GETs `url` and returns the response body, retrying per the policy
    /// described on [`JobSearchClient`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: still 429 on the final attempt.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx on the final attempt.
    /// - [`ScraperError::Http`]: network failure or timeout on the final attempt.
    /// - [`ScraperError::RetriesExhausted`]: `max_attempts` is zero.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(url, self.max_attempts, self.backoff_base_secs, || async move {
            let response = self.transport.send(&self.client, url).await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ScraperError::RateLimited {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}
