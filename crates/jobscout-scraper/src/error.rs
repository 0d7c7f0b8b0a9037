use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by upstream while fetching {url}")]
    RateLimited { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("max retries reached for {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("job count element not found in search results page")]
    JobCountNotFound,

    #[error("could not parse job count from \"{text}\"")]
    JobCountUnparseable { text: String },

    #[error("invalid search base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
