//! Error types for the kit-groups core.

use thiserror::Error;

/// Errors that can occur while decoding or encoding a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The persisted document does not decode into a configuration.
    #[error("malformed configuration document: {0}")]
    Malformed(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
