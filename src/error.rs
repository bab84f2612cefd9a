//! Error types for grafana-export
//!
//! This module provides the error taxonomy of the exporter:
//! - Pre-flight errors (configuration, existing output directory)
//! - Transport errors raised by the dashboard API client
//! - Post-export errors (archive creation, S3 upload)
//!
//! Per-dashboard failures never surface as an [`Error`] from the export loop;
//! they are recorded as [`ItemOutcome::Failed`](crate::types::ItemOutcome) and
//! counted in the [`ExportResult`](crate::types::ExportResult).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for grafana-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for grafana-export
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "url")
        key: Option<String>,
    },

    /// Output directory already exists and overwriting was not requested
    #[error(
        "dashboards directory {} already exists, pass --overwrite to overwrite the directory",
        .0.display()
    )]
    DirectoryExists(PathBuf),

    /// A required local path does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Dashboard API answered with a non-success status
    #[error("dashboard API returned {status} for {endpoint}")]
    Http {
        /// HTTP status code returned by the API
        status: u16,
        /// API endpoint that was requested (relative to `/api/`)
        endpoint: String,
    },

    /// Network error (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive creation failed
    #[error("failed to archive {}: {reason}", .path.display())]
    Archive {
        /// Directory that was being archived
        path: PathBuf,
        /// The reason archiving failed
        reason: String,
    },

    /// Upload to object storage failed
    #[error("failed to upload to S3 bucket {bucket}/{key}: {reason}")]
    Upload {
        /// Destination bucket
        bucket: String,
        /// Destination object key
        key: String,
        /// The reason the upload failed
        reason: String,
    },
}

impl Error {
    /// Shorthand for a configuration error tied to a setting
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Machine-readable error code, used in structured log fields
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::DirectoryExists(_) => "directory_exists",
            Error::NotFound(_) => "not_found",
            Error::Http { .. } => "http_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::Io(_) => "io_error",
            Error::Archive { .. } => "archive_error",
            Error::Upload { .. } => "upload_error",
        }
    }

    /// Whether the error is raised before any export work starts
    pub fn is_preflight(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::DirectoryExists(_))
    }
}
