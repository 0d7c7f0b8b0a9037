use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension, Json,
};
use jobscout_scraper::{JobListing, JobScraper, ScraperError, SearchQuery};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// `GET /scrape/{location}/{time_range}`
///
/// Runs one full scrape with a freshly built client. The request stays open
/// for the whole scrape, politeness delays included.
pub(super) async fn scrape_jobs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Vec<JobListing>>, ApiError> {
    let Path((location, time_range)) = path.map_err(|rejection| {
        tracing::warn!(
            request_id = %req_id.0,
            error = %rejection.body_text(),
            "rejected scrape path"
        );
        ApiError::new("bad_request", "Invalid location or time range")
    })?;
    let query = SearchQuery::new(location, time_range);
    tracing::info!(
        request_id = %req_id.0,
        location = %query.location,
        time_range = %query.time_range,
        "scrape requested"
    );

    let scraper = JobScraper::new(state.scraper_config.as_ref().clone())
        .map_err(|e| map_scrape_error(&req_id.0, &e))?;

    scraper
        .scrape(&query)
        .await
        .map(Json)
        .map_err(|e| map_scrape_error(&req_id.0, &e))
}

fn map_scrape_error(request_id: &str, error: &ScraperError) -> ApiError {
    match error {
        ScraperError::JobCountNotFound => {
            tracing::warn!(request_id, error = %error, "job count element missing");
            ApiError::new("not_found", "Could not retrieve job information")
        }
        ScraperError::JobCountUnparseable { .. } => {
            tracing::warn!(request_id, error = %error, "job count not numeric");
            ApiError::new("not_found", "Could not parse job count")
        }
        _ => {
            tracing::error!(request_id, error = %error, "error scraping job data");
            ApiError::new("internal_error", "Error scraping job data")
        }
    }
}
