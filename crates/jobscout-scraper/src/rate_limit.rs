//! Application-level retry for search page fetches.
//!
//! Sits above the connection-level retry in [`crate::client`]. By the time an
//! error reaches this layer the transport has already retried and backed off,
//! so only HTTP 429 earns an extra (exponential) wait here; every other
//! transient failure is retried immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` for errors produced by a fetch attempt that are worth
/// another attempt.
///
/// Extraction errors ([`ScraperError::JobCountNotFound`],
/// [`ScraperError::JobCountUnparseable`]) and configuration errors
/// ([`ScraperError::InvalidBaseUrl`]) would fail identically on every attempt.
fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::RateLimited { .. }
            | ScraperError::Http(_)
            | ScraperError::UnexpectedStatus { .. }
    )
}

/// Wait before the attempt following a 429 on attempt index `attempt`
/// (0-based): `backoff_base_secs * 2^attempt` seconds.
#[must_use]
pub(crate) fn rate_limit_backoff(backoff_base_secs: u64, attempt: u32) -> Duration {
    Duration::from_secs(backoff_base_secs.saturating_mul(1u64 << attempt.min(62)))
}

/// Runs `operation` up to `max_attempts` times.
///
/// | Outcome of attempt `n` | Not the last attempt | Last attempt |
/// |---|---|---|
/// | `Ok` | return | return |
/// | [`ScraperError::RateLimited`] | sleep `base * 2^n`, retry | return error, no sleep |
/// | other retriable error | log, retry immediately | return error |
/// | non-retriable error | return error | return error |
///
/// With `max_attempts = 0` nothing is attempted and
/// [`ScraperError::RetriesExhausted`] is returned.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    url: &str,
    max_attempts: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    for attempt in 0..max_attempts {
        let is_last = attempt + 1 >= max_attempts;

        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) => return Err(err),
            Err(err) => err,
        };

        if matches!(err, ScraperError::RateLimited { .. }) {
            if is_last {
                tracing::warn!(url, attempt, max_attempts, "rate limited on final attempt");
                return Err(err);
            }
            let delay = rate_limit_backoff(backoff_base_secs, attempt);
            tracing::warn!(
                url,
                attempt,
                max_attempts,
                delay_secs = delay.as_secs(),
                "rate limited, waiting before retrying"
            );
            tokio::time::sleep(delay).await;
            continue;
        }

        tracing::error!(url, attempt, max_attempts, error = %err, "error fetching URL");
        if is_last {
            return Err(err);
        }
    }

    Err(ScraperError::RetriesExhausted {
        url: url.to_owned(),
        attempts: max_attempts,
    })
}
