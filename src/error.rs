//! Error types for netif-check
//!
//! This module defines the error types used throughout the check.
//! We use `thiserror` for ergonomic error definitions and `anyhow` for
//! error propagation in the binary.

use thiserror::Error;

/// Main error type for check operations
#[derive(Error, Debug)]
pub enum CheckError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Interface filter errors (invalid patterns)
    #[error("Filter error: {0}")]
    Filter(String),

    /// Platform-specific errors (sysfs access)
    #[error("Platform error: {0}")]
    Platform(String),

    /// Event emission errors
    #[error("Emit error: {0}")]
    Emit(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias using CheckError
pub type Result<T> = std::result::Result<T, CheckError>;

impl From<serde_json::Error> for CheckError {
    fn from(err: serde_json::Error) -> Self {
        CheckError::Serialization(err.to_string())
    }
}

impl From<regex::Error> for CheckError {
    fn from(err: regex::Error) -> Self {
        CheckError::Filter(err.to_string())
    }
}
