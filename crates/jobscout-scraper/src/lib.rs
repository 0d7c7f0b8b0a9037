pub mod client;
pub mod error;
pub mod pagination;
pub mod parse;
mod rate_limit;
pub mod scrape;
pub mod types;

pub use client::JobSearchClient;
pub use error::ScraperError;
pub use scrape::JobScraper;
pub use types::{JobListing, SearchQuery, NOT_AVAILABLE};
