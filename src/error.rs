//! Service error types with HTTP status code mapping.
//!
//! [`SymbolError`] is the central error type. Each variant maps to a
//! specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Category, RecordId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "DEX symbol with id 42 not found"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// A corrupted collection document is not an error: the store recovers it
/// as an empty collection and logs a warning.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 3000–3999 | Server          | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum SymbolError {
    /// A request field failed schema validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The record would violate the category's uniqueness rule.
    #[error("{0}")]
    Conflict(String),

    /// No record with the given identifier exists.
    #[error("{category} symbol with id {id} not found")]
    NotFound {
        /// Category that was searched.
        category: Category,
        /// Identifier that was not found.
        id: RecordId,
    },

    /// A generated file is unknown or has not been written yet.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Filesystem failure while reading or writing a document.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A collection could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SymbolError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidInput(_) => 1001,
            Self::Conflict(_) => 1002,
            Self::NotFound { .. } => 2001,
            Self::FileNotFound(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Storage(_) => 3001,
            Self::Serialization(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    ///
    /// Conflicts are reported as `400 Bad Request`, which is what existing
    /// clients of the service expect.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::FileNotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Serialization(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SymbolError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
