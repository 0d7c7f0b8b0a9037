use std::net::SocketAddr;
use std::str::FromStr;

use crate::app_config::{AppConfig, ScraperConfig, MAX_PAGES_LIMIT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse
/// or the politeness delay bounds are inverted, or `JOBSCOUT_MAX_PAGES`
/// exceeds [`MAX_PAGES_LIMIT`].
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse
/// or the politeness delay bounds are inverted, or `JOBSCOUT_MAX_PAGES`
/// exceeds [`MAX_PAGES_LIMIT`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to
/// [`ScraperConfig::default`] and the `0.0.0.0:8080` listener.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        parse_var(var, &or_default(var, &default.to_string()))
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        parse_var(var, &or_default(var, &default.to_string()))
    };

    let defaults = ScraperConfig::default();

    let bind_addr: SocketAddr = parse_var(
        "JOBSCOUT_BIND_ADDR",
        &or_default("JOBSCOUT_BIND_ADDR", "0.0.0.0:8080"),
    )?;
    let log_level = or_default("JOBSCOUT_LOG_LEVEL", "info");

    let max_pages = parse_u64("JOBSCOUT_MAX_PAGES", defaults.max_pages)?;
    if max_pages > MAX_PAGES_LIMIT {
        return Err(ConfigError::InvalidEnvVar {
            var: "JOBSCOUT_MAX_PAGES".to_string(),
            reason: format!("{max_pages} exceeds the limit of {MAX_PAGES_LIMIT} pages per scrape"),
        });
    }

    let page_delay_min_ms = parse_u64("JOBSCOUT_PAGE_DELAY_MIN_MS", defaults.page_delay_min_ms)?;
    let page_delay_max_ms = parse_u64("JOBSCOUT_PAGE_DELAY_MAX_MS", defaults.page_delay_max_ms)?;
    if page_delay_min_ms > page_delay_max_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "JOBSCOUT_PAGE_DELAY_MIN_MS".to_string(),
            reason: format!(
                "minimum delay {page_delay_min_ms}ms exceeds maximum delay {page_delay_max_ms}ms"
            ),
        });
    }

    let scraper = ScraperConfig {
        search_base_url: or_default("JOBSCOUT_SEARCH_BASE_URL", &defaults.search_base_url),
        user_agent: or_default("JOBSCOUT_USER_AGENT", &defaults.user_agent),
        request_timeout_secs: parse_u64(
            "JOBSCOUT_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout_secs,
        )?,
        max_attempts: parse_u32("JOBSCOUT_MAX_ATTEMPTS", defaults.max_attempts)?,
        backoff_base_secs: parse_u64("JOBSCOUT_BACKOFF_BASE_SECS", defaults.backoff_base_secs)?,
        transport_max_retries: parse_u32(
            "JOBSCOUT_TRANSPORT_MAX_RETRIES",
            defaults.transport_max_retries,
        )?,
        transport_backoff_factor_ms: parse_u64(
            "JOBSCOUT_TRANSPORT_BACKOFF_FACTOR_MS",
            defaults.transport_backoff_factor_ms,
        )?,
        page_size: defaults.page_size,
        max_pages,
        page_delay_min_ms,
        page_delay_max_ms,
    };

    Ok(AppConfig {
        bind_addr,
        log_level,
        scraper,
    })
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
