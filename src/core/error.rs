//! Typed error handling for the catalog service
//!
//! Every failure the core can report belongs to one of a small number of
//! categories, each with its own HTTP status and stable error code:
//!
//! - [`ValidationError`]: a create payload or a path segment is invalid (400)
//! - [`RecordError`]: unknown identifier (404) or duplicate identifier (409)
//! - [`StorageError`]: the snapshot could not be persisted or restored (500)
//! - `Internal`: a worker task failed (500)
//!
//! Malformed *query* parameters never produce an error; they fall back to
//! their defaults in [`crate::core::query`].
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get_record("abc", &Projection::all()) {
//!     Ok(record) => println!("{record}"),
//!     Err(CatalogError::Record(RecordError::NotFound { id })) => {
//!         println!("no record {id}");
//!     }
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::core::record::now_timestamp;

/// The main error type for the catalog service
#[derive(Debug)]
pub enum CatalogError {
    /// Invalid input on a create request or a path parameter
    Validation(ValidationError),

    /// Lookup or uniqueness failures
    Record(RecordError),

    /// Persistence failures
    Storage(StorageError),

    /// Internal failures (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Validation(e) => write!(f, "{}", e),
            CatalogError::Record(e) => write!(f, "{}", e),
            CatalogError::Storage(e) => write!(f, "{}", e),
            CatalogError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Validation(e) => Some(e),
            CatalogError::Record(e) => Some(e),
            CatalogError::Storage(e) => Some(e),
            CatalogError::Internal(_) => None,
        }
    }
}

/// Body of an error response
///
/// Serialized as `{"error": {"status": 404, "code": "...", "message": "...", "timestamp": "..."}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Structured failure details
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// HTTP status code
    pub status: u16,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// When the error was produced
    pub timestamp: String,
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Record(e) => e.status_code(),
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Validation(_) => "VALIDATION_ERROR",
            CatalogError::Record(e) => e.error_code(),
            CatalogError::Storage(_) => "STORAGE_ERROR",
            CatalogError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                status: self.status_code().as_u16(),
                code: self.error_code().to_string(),
                message: self.to_string(),
                timestamp: now_timestamp(),
            },
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Record Errors
// =============================================================================

/// Errors related to record identity
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// No record carries this identifier
    #[error("Item not found: {id}")]
    NotFound { id: String },

    /// A record with this identifier already exists
    #[error("Item with id '{id}' already exists")]
    AlreadyExists { id: String },
}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "NOT_FOUND",
            RecordError::AlreadyExists { .. } => "CONFLICT",
        }
    }
}

impl From<RecordError> for CatalogError {
    fn from(err: RecordError) -> Self {
        CatalogError::Record(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Body was not a non-empty JSON object
    #[error("Invalid or missing JSON body.")]
    InvalidBody,

    /// Required creation fields are missing or malformed
    #[error("Fields 'name', 'category', and numeric 'price' are required.")]
    MissingRequired,

    /// A specific field has an invalid value
    #[error("Invalid field '{field}': {message}")]
    FieldError { field: String, message: String },
}

impl ValidationError {
    /// Shorthand for a [`ValidationError::FieldError`]
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the snapshot layer
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying file I/O failed
    #[error("Storage I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content could not be encoded or decoded
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store lock was poisoned by a panicking thread
    #[error("Record store lock poisoned")]
    LockPoisoned,
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        CatalogError::Storage(err)
    }
}
