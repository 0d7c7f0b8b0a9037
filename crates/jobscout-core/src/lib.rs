mod app_config;
mod config;

pub use app_config::{
    AppConfig, ScraperConfig, DEFAULT_SEARCH_BASE_URL, DEFAULT_USER_AGENT, MAX_PAGES_LIMIT,
    UPSTREAM_PAGE_SIZE,
};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
