//! Error types for the rn-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the library crates
/// and provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Records error: {0}")]
    Records(String),

    #[error("Configuration invalid: {0}")]
    Validation(String),

    #[error("Network invariant violated: {0}")]
    Graph(String),

    #[error("Failed to read report: {path}")]
    ReportRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write report: {path}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rn-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<rn_records::RecordsError> for AppError {
    fn from(err: rn_records::RecordsError) -> Self {
        AppError::Records(err.to_string())
    }
}

impl From<rn_records::ValidationError> for AppError {
    fn from(err: rn_records::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<rn_core::CoreError> for AppError {
    fn from(err: rn_core::CoreError) -> Self {
        AppError::Graph(err.to_string())
    }
}
