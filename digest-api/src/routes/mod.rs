//! API route definitions

mod digest;
mod health;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(digest::routes())
        .merge(health::routes())
}
