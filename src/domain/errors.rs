//! Domain error types
//!
//! This module defines the error hierarchy for pii-curator.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main pii-curator error type
///
/// This is the primary error type used throughout the library.
/// Batch-level failures surface through this type with no partial output.
#[derive(Debug, Error)]
pub enum CuratorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors talking to the inference endpoint
    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    /// Validation errors (mismatched batch shapes, bad input records)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document filter errors (unknown filter, bad parameters)
    #[error("Filter error: {0}")]
    Filter(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Inference endpoint errors
///
/// Transport-level failures only. Malformed model *content* is never
/// reported through this type; it degrades to an empty entity list instead.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to reach the endpoint
    #[error("Failed to connect to inference endpoint: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Credential rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// The response envelope could not be decoded
    #[error("Invalid response from endpoint: {0}")]
    InvalidResponse(String),
}

impl InferenceError {
    /// Map an HTTP status and body to the matching variant
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::AuthenticationFailed(format!("status {status}: {message}")),
            400..=499 => Self::ClientError { status, message },
            _ => Self::ServerError { status, message },
        }
    }

    /// Whether the endpoint could not be reached or did not answer in time
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::Timeout(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CuratorError {
    fn from(err: std::io::Error) -> Self {
        CuratorError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CuratorError {
    fn from(err: serde_json::Error) -> Self {
        CuratorError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CuratorError {
    fn from(err: toml::de::Error) -> Self {
        CuratorError::Configuration(format!("TOML parse error: {err}"))
    }
}
