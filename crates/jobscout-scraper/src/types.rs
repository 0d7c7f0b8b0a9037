//! Request and result types for a single scrape.

use serde::{Deserialize, Serialize};

/// Placeholder for any job-card field that is missing from the markup.
pub const NOT_AVAILABLE: &str = "N/A";

/// Caller-supplied search parameters.
///
/// Both values are forwarded verbatim (form-urlencoded) into the upstream
/// query string. `time_range` is the site's own relative-time token, e.g.
/// `r86400` for the past 24 hours.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchQuery {
    pub location: String,
    pub time_range: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(location: impl Into<String>, time_range: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            time_range: time_range.into(),
        }
    }
}

/// One job card from a search results page.
///
/// Every field falls back to [`NOT_AVAILABLE`] on its own, so a card with a
/// missing company still carries its title, location, and link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(rename = "job_title")]
    pub title: String,
    #[serde(rename = "company_name")]
    pub company: String,
    pub location: String,
    pub link: String,
}
