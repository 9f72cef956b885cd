//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::domain::{CexFields, DexFields, FuturesFields};
use crate::service::{CollectionService, SymbolService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Category handlers extract their own [`CollectionService`] through the
/// [`FromRef`] impls below.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Symbol service for all business logic.
    pub symbol_service: Arc<SymbolService>,
}

impl FromRef<AppState> for Arc<CollectionService<DexFields>> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(state.symbol_service.dex())
    }
}

impl FromRef<AppState> for Arc<CollectionService<CexFields>> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(state.symbol_service.cex())
    }
}

impl FromRef<AppState> for Arc<CollectionService<FuturesFields>> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(state.symbol_service.futures())
    }
}
