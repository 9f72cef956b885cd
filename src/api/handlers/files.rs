//! Generated-file endpoints: status, download, preview, backup.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{BackupResponse, FileContentResponse, FileStatusResponse};
use crate::app_state::AppState;
use crate::domain::Category;
use crate::error::{ErrorResponse, SymbolError};

/// `GET /api/files/status`: Record counts and generated-file metadata.
///
/// # Errors
///
/// Returns [`SymbolError`] if a collection document cannot be read.
#[utoipa::path(
    get,
    path = "/api/files/status",
    tag = "Files",
    summary = "Generated file status",
    description = "Returns record counts per category, sizes and existence of the generated text files, and the latest update time.",
    responses(
        (status = 200, description = "File status", body = FileStatusResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn file_status(
    State(state): State<AppState>,
) -> Result<Json<FileStatusResponse>, SymbolError> {
    let status = state.symbol_service.file_status().await?;
    Ok(Json(status.into()))
}

/// `GET /api/files/download/{file_type}`: Generated file as an attachment.
///
/// # Errors
///
/// Returns [`SymbolError::FileNotFound`] for unknown kinds or files that
/// have not been generated.
#[utoipa::path(
    get,
    path = "/api/files/download/{file_type}",
    tag = "Files",
    summary = "Download a generated file",
    description = "Streams `pooladdress.txt`, `cex_symbols.txt`, or `futures_symbols.txt` as a plain-text attachment.",
    params(
        ("file_type" = String, Path, description = "One of `pooladdress`, `cex_symbols`, `futures_symbols`"),
    ),
    responses(
        (status = 200, description = "File contents", body = String, content_type = "text/plain"),
        (status = 404, description = "File not found", body = ErrorResponse),
    )
)]
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_type): Path<String>,
) -> Result<impl IntoResponse, SymbolError> {
    let category = Category::from_file_kind(&file_type)?;
    let content = state.symbol_service.projector(category).read().await?;

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", category.projection_file()),
        ),
    ];
    Ok((headers, content))
}

/// `GET /api/files/content/{file_type}`: Generated file for preview.
///
/// # Errors
///
/// Returns [`SymbolError::FileNotFound`] for unknown kinds or files that
/// have not been generated.
#[utoipa::path(
    get,
    path = "/api/files/content/{file_type}",
    tag = "Files",
    summary = "Preview a generated file",
    description = "Returns the text of a generated file wrapped in JSON.",
    params(
        ("file_type" = String, Path, description = "One of `pooladdress`, `cex_symbols`, `futures_symbols`"),
    ),
    responses(
        (status = 200, description = "File contents", body = FileContentResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
    )
)]
pub async fn file_content(
    State(state): State<AppState>,
    Path(file_type): Path<String>,
) -> Result<Json<FileContentResponse>, SymbolError> {
    let category = Category::from_file_kind(&file_type)?;
    let content = state.symbol_service.projector(category).read().await?;
    Ok(Json(FileContentResponse { content }))
}

/// `POST /api/files/backup/create`: Back up every collection document now.
///
/// # Errors
///
/// Returns [`SymbolError`] if a copy fails.
#[utoipa::path(
    post,
    path = "/api/files/backup/create",
    tag = "Files",
    summary = "Create backups",
    description = "Copies each existing collection document into the backup directory without modifying it.",
    responses(
        (status = 200, description = "Backups created", body = BackupResponse),
        (status = 500, description = "Backup failed", body = ErrorResponse),
    )
)]
pub async fn create_backup(
    State(state): State<AppState>,
) -> Result<Json<BackupResponse>, SymbolError> {
    let created = state.symbol_service.backup_all().await?;
    Ok(Json(BackupResponse {
        message: "Backup created successfully".to_string(),
        timestamp: Utc::now(),
        files: created
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
    }))
}

/// File routes, nested under `/api/files`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(file_status))
        .route("/download/{file_type}", get(download_file))
        .route("/content/{file_type}", get(file_content))
        .route("/backup/create", post(create_backup))
}
