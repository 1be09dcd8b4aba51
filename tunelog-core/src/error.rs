//! Error types for tunelog-core

use thiserror::Error;

/// Main error type for the tunelog-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A required field was absent from a play record
    #[error("row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },

    /// A field was present but its value is not acceptable
    #[error("row {row}: invalid `{field}`: {message}")]
    InvalidField {
        row: usize,
        field: &'static str,
        message: String,
    },
}

/// Result type alias for tunelog-core
pub type Result<T> = std::result::Result<T, Error>;
