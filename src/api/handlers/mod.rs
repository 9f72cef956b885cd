//! REST endpoint handlers organized by resource.

pub mod files;
pub mod symbols;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/dex", symbols::dex::routes())
        .nest("/cex", symbols::cex::routes())
        .nest("/futures", symbols::futures::routes())
        .nest("/files", files::routes())
}
