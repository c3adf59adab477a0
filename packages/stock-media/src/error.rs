//! Error types for the stock media client.

use thiserror::Error;

/// Result type for stock media operations.
pub type Result<T> = std::result::Result<T, MediaSearchError>;

/// Stock media client errors.
#[derive(Debug, Error)]
pub enum MediaSearchError {
    /// Configuration error (missing API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx API response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
