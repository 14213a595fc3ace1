//! Daily digest endpoints

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::error;

use crate::AppState;

/// Browsers and proxies may reuse a digest for an hour
const CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create digest routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/daily-articles", get(get_daily_articles))
        .route("/daily-essays", get(get_daily_essays))
}

/// GET /api/daily-articles - Top articles per category
async fn get_daily_articles(State(state): State<AppState>) -> impl IntoResponse {
    match state.digest_service.daily_digest().await {
        Ok(digest) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, CACHE_CONTROL)],
            Json(digest),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to build daily articles: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/daily-essays - Flat list of long-form essays
async fn get_daily_essays(State(state): State<AppState>) -> impl IntoResponse {
    match state.digest_service.daily_essays().await {
        Ok(essays) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, CACHE_CONTROL)],
            Json(essays),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to build daily essays: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
