//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{middleware::from_fn, Router};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::reducer::Reducer;

pub use routes::create_router;

/// Shared handler state
///
/// The reducer has a single writer at a time; queries take a read lock and
/// so always see whole events applied.
#[derive(Debug, Clone)]
pub struct AppState {
    pub reducer: Arc<RwLock<Reducer>>,
    pub default_top_k: usize,
    pub max_top_k: usize,
}

impl AppState {
    pub fn new(reducer: Reducer, config: &Config) -> Self {
        Self {
            reducer: Arc::new(RwLock::new(reducer)),
            default_top_k: config.default_top_k,
            max_top_k: config.max_top_k,
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let api_router = create_router().layer(from_fn(middleware::logging_middleware));

    Router::new()
        // Health check
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
