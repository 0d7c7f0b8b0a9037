use std::net::SocketAddr;

/// Browser-like `User-Agent` sent with every outbound search request.
///
/// The guest job-search page serves a stripped-down (or empty) result list to
/// non-browser agents, so the default mimics desktop Chrome.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.linkedin.com/jobs/search";

/// Number of job cards the upstream search page renders per `pageNum`.
pub const UPSTREAM_PAGE_SIZE: u64 = 25;

/// Most pages a single scrape may fetch. Configuration can lower the cap but
/// never raise it.
pub const MAX_PAGES_LIMIT: u64 = 2;

/// Everything a single scrape needs: upstream location, request headers,
/// both retry layers, and pagination/politeness bounds.
///
/// One value is built at startup and cloned into each scrape; nothing in it
/// is mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub search_base_url: String,
    pub user_agent: String,
    /// Per-attempt timeout for a single GET.
    pub request_timeout_secs: u64,
    /// Application-level attempts per page fetch.
    pub max_attempts: u32,
    /// Base for the 429 backoff: `backoff_base_secs * 2^attempt`.
    pub backoff_base_secs: u64,
    /// Connection-level retries applied beneath each application attempt.
    pub transport_max_retries: u32,
    /// Connection-level backoff factor in milliseconds.
    pub transport_backoff_factor_ms: u64,
    pub page_size: u64,
    /// Hard cap on pages fetched per scrape, independent of the result count.
    pub max_pages: u64,
    pub page_delay_min_ms: u64,
    pub page_delay_max_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            request_timeout_secs: 30,
            max_attempts: 3,
            backoff_base_secs: 10,
            transport_max_retries: 5,
            transport_backoff_factor_ms: 100,
            page_size: UPSTREAM_PAGE_SIZE,
            max_pages: MAX_PAGES_LIMIT,
            page_delay_min_ms: 5_000,
            page_delay_max_ms: 10_000,
        }
    }
}

impl ScraperConfig {
    /// A config that never sleeps: both backoff layers and the politeness
    /// delay are zeroed. Intended for tests against a local mock server.
    #[must_use]
    pub fn without_delays(search_base_url: impl Into<String>) -> Self {
        Self {
            search_base_url: search_base_url.into(),
            backoff_base_secs: 0,
            transport_backoff_factor_ms: 0,
            page_delay_min_ms: 0,
            page_delay_max_ms: 0,
            request_timeout_secs: 5,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub scraper: ScraperConfig,
}
