//! Generated-file DTOs: status, preview, and backup.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::FileStatus;

/// Response body for `GET /api/files/status`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileStatusResponse {
    /// Number of DEX records.
    pub dex_symbols_count: usize,
    /// Number of CEX records.
    pub cex_symbols_count: usize,
    /// Number of futures records.
    pub futures_symbols_count: usize,
    /// Size of `pooladdress.txt` in bytes.
    pub dex_file_size: u64,
    /// Size of `cex_symbols.txt` in bytes.
    pub cex_file_size: u64,
    /// Size of `futures_symbols.txt` in bytes.
    pub futures_file_size: u64,
    /// Later of the DEX and CEX last-updated timestamps.
    pub last_updated: DateTime<Utc>,
    /// Whether `pooladdress.txt` exists.
    pub pooladdress_file_exists: bool,
    /// Whether `cex_symbols.txt` exists.
    pub cex_symbols_file_exists: bool,
    /// Whether `futures_symbols.txt` exists.
    pub futures_symbols_file_exists: bool,
}

impl From<FileStatus> for FileStatusResponse {
    fn from(s: FileStatus) -> Self {
        Self {
            dex_symbols_count: s.dex_symbols_count,
            cex_symbols_count: s.cex_symbols_count,
            futures_symbols_count: s.futures_symbols_count,
            dex_file_size: s.dex_file_size,
            cex_file_size: s.cex_file_size,
            futures_file_size: s.futures_file_size,
            last_updated: s.last_updated,
            pooladdress_file_exists: s.pooladdress_file_exists,
            cex_symbols_file_exists: s.cex_symbols_file_exists,
            futures_symbols_file_exists: s.futures_symbols_file_exists,
        }
    }
}

/// Response body for `GET /api/files/content/{file_type}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileContentResponse {
    /// Full text of the generated file.
    pub content: String,
}

/// Response body for `POST /api/files/backup/create`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BackupResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Time the backup was requested.
    pub timestamp: DateTime<Utc>,
    /// Backup files written, one per existing document.
    pub files: Vec<String>,
}
