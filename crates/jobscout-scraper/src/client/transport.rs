//! Connection-level retry beneath every application-level fetch attempt.
//!
//! Retries GETs that fail to connect, time out, or lose the connection before
//! a response arrives, and responses whose status
//! is in [`RETRY_STATUSES`], with a short exponential backoff. When status
//! retries run out the last response is returned as-is so the caller can
//! classify it (a 429 still reaches the application-level backoff).

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

/// Statuses retried at the connection level.
pub(crate) const RETRY_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Upper bound for a single computed backoff.
const MAX_BACKOFF: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy)]
pub(crate) struct TransportRetry {
    max_retries: u32,
    backoff_factor: Duration,
}

impl TransportRetry {
    pub(crate) fn new(max_retries: u32, backoff_factor_ms: u64) -> Self {
        Self {
            max_retries,
            backoff_factor: Duration::from_millis(backoff_factor_ms),
        }
    }

    /// Sleep before the `retry`-th consecutive retry (1-based).
    ///
    /// The first retry is immediate; after that the wait is
    /// `factor * 2^(retry - 1)`, capped at [`MAX_BACKOFF`]. With the default
    /// 100 ms factor: 0, 200 ms, 400 ms, 800 ms, 1.6 s.
    pub(crate) fn backoff(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        self.backoff_factor
            .saturating_mul(1u32 << (retry - 1).min(31))
            .min(MAX_BACKOFF)
    }

    /// Sends a GET to `url`, retrying at the connection level.
    ///
    /// # Errors
    ///
    /// Returns the last [`reqwest::Error`] if the request never produced a
    /// response, either because the error is not retriable or because the
    /// retries ran out.
    pub(crate) async fn send(&self, client: &Client, url: &str) -> Result<Response, reqwest::Error> {
        let mut retries = 0u32;

        loop {
            match client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !RETRY_STATUSES.contains(&status) || retries >= self.max_retries {
                        return Ok(response);
                    }
                    retries += 1;
                    let delay = retry_after(&response).unwrap_or_else(|| self.backoff(retries));
                    drop(response);
                    tracing::debug!(
                        url,
                        status = status.as_u16(),
                        retry = retries,
                        max_retries = self.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "retryable status, retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) if is_retriable(&err) && retries < self.max_retries => {
                    retries += 1;
                    let delay = self.backoff(retries);
                    tracing::debug!(
                        url,
                        retry = retries,
                        max_retries = self.max_retries,
                        error = %err,
                        "connection failure, retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Connect failures, timeouts, and connections dropped mid-request. Builder
/// and redirect errors are not retried.
fn is_retriable(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || err.is_request() || err.is_body()
}

/// Seconds from a numeric `Retry-After` header on a 429 or 503 response.
fn retry_after(response: &Response) -> Option<Duration> {
    let status = response.status();
    if status != StatusCode::TOO_MANY_REQUESTS && status != StatusCode::SERVICE_UNAVAILABLE {
        return None;
    }
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
