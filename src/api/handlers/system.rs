//! System endpoints: banner, health check, supported DEX types.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::DexType;

/// Service banner.
#[derive(Debug, Serialize, ToSchema)]
struct RootResponse {
    message: &'static str,
    version: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /`: Service name and version.
pub async fn root_handler() -> impl IntoResponse {
    Json(RootResponse {
        message: "Crypto Symbols Manager API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Supported DEX type info.
#[derive(Debug, Serialize, ToSchema)]
struct DexTypeInfo {
    dex_type: &'static str,
    description: &'static str,
}

/// `GET /config/dex-types`: List supported DEX protocol types.
#[utoipa::path(
    get,
    path = "/config/dex-types",
    tag = "System",
    summary = "List supported DEX types",
    description = "Returns every AMM protocol type accepted in the `dex_type` field.",
    responses(
        (status = 200, description = "DEX type catalog", body = Vec<DexTypeInfo>),
    )
)]
pub async fn dex_types_handler() -> impl IntoResponse {
    let types: Vec<DexTypeInfo> = DexType::ALL
        .into_iter()
        .map(|t| DexTypeInfo {
            dex_type: t.as_str(),
            description: t.description(),
        })
        .collect();
    (StatusCode::OK, Json(types))
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/config/dex-types", get(dex_types_handler))
}
