//! Field extraction from guest job-search result pages.
//!
//! Relevant markup (trimmed):
//!
//! ```text
//! <span class="results-context-header__job-count">1,234</span>
//! <div class="base-card ...">
//!   <a class="base-card__full-link" href="https://.../jobs/view/...">
//!   <h3 class="base-search-card__title">Rust Engineer</h3>
//!   <h4 class="base-search-card__subtitle"><a>Acme</a></h4>
//!   <span class="job-search-card__location">Berlin, Germany</span>
//! </div>
//! ```
//!
//! Everything here is synchronous: `scraper::Html` is not `Send`, so a parsed
//! document must never live across an `.await`.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::types::{JobListing, NOT_AVAILABLE};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid static selector")
}

static JOB_COUNT: LazyLock<Selector> =
    LazyLock::new(|| selector("span.results-context-header__job-count"));
static JOB_CARD: LazyLock<Selector> = LazyLock::new(|| selector("div.base-card"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h3.base-search-card__title"));
static COMPANY: LazyLock<Selector> =
    LazyLock::new(|| selector("h4.base-search-card__subtitle"));
static LOCATION: LazyLock<Selector> =
    LazyLock::new(|| selector("span.job-search-card__location"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.base-card__full-link"));

/// First ASCII integer in a string, with comma thousands separators allowed
/// (`"1,234"`). Plain digit runs are matched by the second branch. `\d` is
/// Unicode-aware in `regex`, so digits are spelled out as `[0-9]`.
static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+").expect("valid number regex")
});

/// Reads the total result count from the header of a search results page.
///
/// # Errors
///
/// - [`ScraperError::JobCountNotFound`] if the count element is absent.
/// - [`ScraperError::JobCountUnparseable`] if it contains no number.
pub fn parse_job_count(html: &str) -> Result<u64, ScraperError> {
    let document = Html::parse_document(html);
    let element = document
        .select(&JOB_COUNT)
        .next()
        .ok_or(ScraperError::JobCountNotFound)?;

    let text = element_text(element);
    parse_count_text(&text).ok_or(ScraperError::JobCountUnparseable { text })
}

/// Parses the first numeric token in `text`, dropping thousands separators.
///
/// `"1,234 results"` → `1234`, `"Over 500+ jobs"` → `500`.
/// Returns `None` when there are no digits or the number overflows `u64`.
pub(crate) fn parse_count_text(text: &str) -> Option<u64> {
    let token = FIRST_NUMBER.find(text)?.as_str();
    token.replace(',', "").parse::<u64>().ok()
}

/// Extracts every job card on the page, in document order.
///
/// Cards are never skipped: each field that cannot be found is set to
/// [`NOT_AVAILABLE`] independently of the others.
#[must_use]
pub fn parse_job_cards(html: &str) -> Vec<JobListing> {
    let document = Html::parse_document(html);
    document.select(&JOB_CARD).map(parse_card).collect()
}

fn parse_card(card: ElementRef<'_>) -> JobListing {
    let text_of = |sel: &Selector| {
        card.select(sel)
            .next()
            .map_or_else(|| NOT_AVAILABLE.to_owned(), element_text)
    };

    let link = card
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |href| href.trim().to_owned());

    JobListing {
        title: text_of(&TITLE),
        company: text_of(&COMPANY),
        location: text_of(&LOCATION),
        link,
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
