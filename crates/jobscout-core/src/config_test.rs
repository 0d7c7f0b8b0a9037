use std::collections::HashMap;
use std::env::VarError;

use super::*;
use crate::app_config::{DEFAULT_SEARCH_BASE_URL, DEFAULT_USER_AGENT};

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.scraper.search_base_url, DEFAULT_SEARCH_BASE_URL);
    assert_eq!(cfg.scraper.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.scraper.request_timeout_secs, 30);
    assert_eq!(cfg.scraper.max_attempts, 3);
    assert_eq!(cfg.scraper.backoff_base_secs, 10);
    assert_eq!(cfg.scraper.transport_max_retries, 5);
    assert_eq!(cfg.scraper.transport_backoff_factor_ms, 100);
    assert_eq!(cfg.scraper.page_size, 25);
    assert_eq!(cfg.scraper.max_pages, 2);
    assert_eq!(cfg.scraper.page_delay_min_ms, 5_000);
    assert_eq!(cfg.scraper.page_delay_max_ms, 10_000);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_BIND_ADDR"),
        "expected InvalidEnvVar(JOBSCOUT_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper.request_timeout_secs, 60);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(JOBSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper.user_agent, "custom-agent/2.0");
}

#[test]
fn retry_settings_override() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_MAX_ATTEMPTS", "5");
    map.insert("JOBSCOUT_BACKOFF_BASE_SECS", "2");
    map.insert("JOBSCOUT_TRANSPORT_MAX_RETRIES", "0");
    map.insert("JOBSCOUT_TRANSPORT_BACKOFF_FACTOR_MS", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper.max_attempts, 5);
    assert_eq!(cfg.scraper.backoff_base_secs, 2);
    assert_eq!(cfg.scraper.transport_max_retries, 0);
    assert_eq!(cfg.scraper.transport_backoff_factor_ms, 250);
}

#[test]
fn negative_max_attempts_is_rejected() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_MAX_ATTEMPTS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(JOBSCOUT_MAX_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn values_are_trimmed_before_parsing() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_MAX_PAGES", " 1 ");
    map.insert("JOBSCOUT_MAX_ATTEMPTS", "\t4\n");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper.max_pages, 1);
    assert_eq!(cfg.scraper.max_attempts, 4);
}

#[test]
fn max_pages_can_be_lowered() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_MAX_PAGES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper.max_pages, 0);
}

#[test]
fn max_pages_above_limit_is_rejected() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_MAX_PAGES", "3");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_MAX_PAGES"),
        "expected InvalidEnvVar(JOBSCOUT_MAX_PAGES), got: {result:?}"
    );
}

#[test]
fn invalid_transport_max_retries_is_rejected() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_TRANSPORT_MAX_RETRIES", "five");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_TRANSPORT_MAX_RETRIES"),
        "expected InvalidEnvVar(JOBSCOUT_TRANSPORT_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn search_base_url_override() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_SEARCH_BASE_URL", "http://127.0.0.1:9999/jobs/search");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.scraper.search_base_url,
        "http://127.0.0.1:9999/jobs/search"
    );
}

#[test]
fn page_delay_bounds_override() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_PAGE_DELAY_MIN_MS", "100");
    map.insert("JOBSCOUT_PAGE_DELAY_MAX_MS", "200");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper.page_delay_min_ms, 100);
    assert_eq!(cfg.scraper.page_delay_max_ms, 200);
}

#[test]
fn inverted_page_delay_bounds_are_rejected() {
    let mut map = HashMap::new();
    map.insert("JOBSCOUT_PAGE_DELAY_MIN_MS", "9000");
    map.insert("JOBSCOUT_PAGE_DELAY_MAX_MS", "1000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "JOBSCOUT_PAGE_DELAY_MIN_MS"),
        "expected InvalidEnvVar(JOBSCOUT_PAGE_DELAY_MIN_MS), got: {result:?}"
    );
}

#[test]
fn without_delays_zeroes_every_sleep() {
    let cfg = ScraperConfig::without_delays("http://localhost:1234/jobs/search");
    assert_eq!(cfg.search_base_url, "http://localhost:1234/jobs/search");
    assert_eq!(cfg.backoff_base_secs, 0);
    assert_eq!(cfg.transport_backoff_factor_ms, 0);
    assert_eq!(cfg.page_delay_min_ms, 0);
    assert_eq!(cfg.page_delay_max_ms, 0);
    assert_eq!(cfg.max_attempts, 3);
    assert_eq!(cfg.max_pages, 2);
}
