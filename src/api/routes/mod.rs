//! Route handlers and router assembly.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::state::AppState;

pub mod assistant;
pub mod export;
pub mod extract;
pub mod health;
pub mod laytime;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/extract", post(extract::extract))
        .route("/api/extract/status", get(extract::status))
        .route("/api/laytime", post(laytime::calculate))
        .route("/api/assistant", post(assistant::ask))
        .route("/api/export", post(export::export))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
