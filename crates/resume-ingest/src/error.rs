//! Error types for the resume ingestion pipeline

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingestion::ExtractionError;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Resume ingestion errors
///
/// Only the batch rejections (`NoValidFiles`, `TooManyFiles`) abort a whole
/// batch. Everything that goes wrong with a single file is turned into a
/// failed candidate record by the assembler instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Expansion produced no admissible resume files
    #[error("No valid resume files found. Supported formats: {supported}")]
    NoValidFiles { supported: String },

    /// Expansion produced more files than one batch may hold
    #[error("Too many files. Maximum {limit} resumes per upload.")]
    TooManyFiles { file_count: usize, limit: usize },

    /// A zip archive could not be opened or one of its entries could not be read
    #[error("Failed to read archive '{filename}': {message}")]
    ArchiveCorrupt { filename: String, message: String },

    /// Text extraction failed for a single document
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Malformed request at the boundary
    #[error("{0}")]
    InvalidRequest(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an archive error
    pub fn archive_corrupt(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArchiveCorrupt {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error rejects a whole batch
    pub fn is_batch_rejection(&self) -> bool {
        matches!(self, Self::NoValidFiles { .. } | Self::TooManyFiles { .. })
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Error::NoValidFiles { .. } => (StatusCode::BAD_REQUEST, "no_valid_files"),
            Error::TooManyFiles { .. } => (StatusCode::BAD_REQUEST, "too_many_files"),
            Error::ArchiveCorrupt { .. } => (StatusCode::BAD_REQUEST, "archive_corrupt"),
            Error::Extraction(_) => (StatusCode::UNPROCESSABLE_ENTITY, "parse_error"),
            Error::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            Error::Csv(_) => (StatusCode::INTERNAL_SERVER_ERROR, "csv_error"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let mut body = json!({
            "error": self.to_string(),
            "type": error_type,
        });
        if let Error::TooManyFiles { file_count, .. } = &self {
            body["fileCount"] = json!(file_count);
        }

        (status, Json(body)).into_response()
    }
}
