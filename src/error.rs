//! Error types for the Engram memory bridge
//!
//! Structured error definitions via thiserror; anyhow is reserved for the
//! binary boundary.

use thiserror::Error;

/// Main error type for Engram operations
#[derive(Error, Debug)]
pub enum EngramError {
    /// Remote recall service rejected or failed a call
    #[error("Store error: {0}")]
    Store(String),

    /// Tool arguments failed validation or could not be decoded
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Engram operations
pub type Result<T> = std::result::Result<T, EngramError>;
