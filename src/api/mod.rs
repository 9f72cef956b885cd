//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Category endpoints are mounted under `/api/{dex,cex,futures}`, file
//! endpoints under `/api/files`, and system endpoints at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}

/// Binds the API router to its state and adds HTTP tracing.
///
/// CORS and the Swagger UI are layered on by the binary.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
