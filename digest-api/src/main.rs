//! Daily Digest API Server
//!
//! Serves a once-a-day selection of long-form articles per category, plus a
//! flat list of essays, built from public RSS and Atom feeds.

mod config;
mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

use digest_feeds::{default_categories, essay_feeds, RssFetcher};
use digest_services::DigestService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ServerConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub digest_service: Arc<DigestService>,
}

/// Router with request tracing and CORS for any origin
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,digest_api=debug")),
        )
        .init();

    info!("Starting Daily Digest API");

    let config = ServerConfig::from_env()?;
    info!(
        "Orchestration: {}, scoring: {}, max articles: {}, cache TTL: {}s",
        config.pipeline.orchestration,
        config.scoring,
        config.pipeline.category_selection.max_count,
        config.pipeline.cache_ttl_secs
    );

    let fetcher = Arc::new(RssFetcher::new());
    let digest_service = DigestService::new(
        fetcher,
        default_categories(),
        essay_feeds(),
        config.pipeline,
    );

    let state = AppState {
        digest_service: Arc::new(digest_service),
    };

    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
