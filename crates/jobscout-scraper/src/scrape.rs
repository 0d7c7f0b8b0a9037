//! Paginated scrape of one job search.

use jobscout_core::{ScraperConfig, MAX_PAGES_LIMIT};

use crate::client::JobSearchClient;
use crate::error::ScraperError;
use crate::pagination::{page_count, politeness_delay};
use crate::parse::{parse_job_cards, parse_job_count};
use crate::types::{JobListing, SearchQuery};

/// Fixed `trk` value the search form submits.
const TRACKING_TOKEN: &str = "public_jobs_jobs-search-bar_search-submit";

/// Drives a full scrape: discovery fetch, page-count math, then a sequential
/// fetch-and-extract loop over at most `max_pages` pages, and never more than
/// [`MAX_PAGES_LIMIT`].
///
/// Build one per scrape. Nothing is shared between instances, so concurrent
/// scrapes never contend with each other.
pub struct JobScraper {
    client: JobSearchClient,
    config: ScraperConfig,
}

impl JobScraper {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let client = JobSearchClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Scrapes every listing for `query`, up to `max_pages` pages.
    ///
    /// Listings are returned in page order, then document order within a
    /// page. Duplicates across pages are kept. After every page, including
    /// the last, the task sleeps for a random politeness delay.
    ///
    /// **All-or-nothing semantics**: if any page fails after its retries,
    /// listings already collected from earlier pages are dropped and the
    /// error is returned. A partial list would be indistinguishable from a
    /// short result set to the caller.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::JobCountNotFound`] / [`ScraperError::JobCountUnparseable`]
    ///   when the discovery page lacks a readable result count. No page fetches
    ///   follow.
    /// - Any error from [`JobSearchClient::fetch_page`].
    /// - [`ScraperError::InvalidBaseUrl`] if `search_base_url` is not a URL.
    pub async fn scrape(&self, query: &SearchQuery) -> Result<Vec<JobListing>, ScraperError> {
        let discovery_url = Self::search_url(&self.config.search_base_url, query, 0)?;
        let html = self.client.fetch_page(&discovery_url).await?;

        let total_jobs = parse_job_count(&html).inspect_err(|e| {
            tracing::warn!(
                url = %discovery_url,
                error = %e,
                "could not read job count; the page layout may have changed"
            );
        })?;

        let total_pages = page_count(total_jobs, self.config.page_size);
        let pages = total_pages
            .min(self.config.max_pages)
            .min(MAX_PAGES_LIMIT);
        tracing::info!(
            location = %query.location,
            time_range = %query.time_range,
            total_jobs,
            total_pages,
            pages,
            "starting paginated scrape"
        );

        let mut listings: Vec<JobListing> = Vec::new();
        for page in 0..pages {
            let url = Self::search_url(&self.config.search_base_url, query, page)?;
            let html = self.client.fetch_page(&url).await?;

            let cards = parse_job_cards(&html);
            tracing::debug!(page, cards = cards.len(), "extracted job cards");
            listings.extend(cards);

            let delay =
                politeness_delay(self.config.page_delay_min_ms, self.config.page_delay_max_ms);
            tokio::time::sleep(delay).await;
        }

        tracing::info!(listings = listings.len(), "scrape complete");
        Ok(listings)
    }

    /// Builds the search URL for `query` at 0-based `page`.
    ///
    /// Parameters are form-urlencoded in a fixed order: `location`, `f_TPR`,
    /// `trk`, `position`, `pageNum`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn search_url(base_url: &str, query: &SearchQuery, page: u64) -> Result<String, ScraperError> {
        let mut url = reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("location", &query.location)
            .append_pair("f_TPR", &query.time_range)
            .append_pair("trk", TRACKING_TOKEN)
            .append_pair("position", "1")
            .append_pair("pageNum", &page.to_string());

        Ok(url.to_string())
    }
}
