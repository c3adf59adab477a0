//! Error types for the Reddit client.

use thiserror::Error;

/// Result type for Reddit client operations.
pub type Result<T> = std::result::Result<T, RedditError>;

/// Reddit client errors.
#[derive(Debug, Error)]
pub enum RedditError {
    /// Configuration error (missing credentials)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx API response
    #[error("Reddit API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// OAuth token request failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
