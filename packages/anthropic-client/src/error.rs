use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnthropicError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response contained no text content")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, AnthropicError>;
