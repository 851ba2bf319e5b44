//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted document is not valid JSON.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A document failed to serialize.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, StoreError>;
