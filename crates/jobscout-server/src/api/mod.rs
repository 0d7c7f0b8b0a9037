mod scrape;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use jobscout_core::ScraperConfig;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id;

/// Shared, read-only state. Each scrape clones the config and builds its own
/// HTTP client, so handlers never share mutable state.
#[derive(Clone)]
pub struct AppState {
    pub scraper_config: Arc<ScraperConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(scraper_config: ScraperConfig) -> Self {
        Self {
            scraper_config: Arc::new(scraper_config),
        }
    }
}

/// JSON error reply: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub code: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    #[must_use]
    pub fn new(code: &'static str, message: &'static str) -> Self {
        Self { code, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.code {
            "bad_request" => StatusCode::BAD_REQUEST,
            "not_found" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.message })).into_response()
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/scrape/{location}/{time_range}", get(scrape::scrape_jobs))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
