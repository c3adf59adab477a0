//! Minimal client for the Anthropic Messages API.
//!
//! Only covers the single-turn completion shape the content pipeline
//! needs: send a prompt, get text plus token usage back.
//!
//! # Example
//!
//! ```no_run
//! use anthropic_client::AnthropicClient;
//!
//! # async fn run() -> Result<(), anthropic_client::AnthropicError> {
//! let client = AnthropicClient::new("api-key".to_string(), None);
//! let (text, tokens) = client.complete("Summarize this post", 1024).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;

pub use error::{AnthropicError, Result};
pub use types::{Message, MessagesRequest, MessagesResponse, Usage};

use types::{ApiErrorResponse, ContentBlock};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single user prompt and return the text reply with total
    /// token usage.
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<(String, u64)> {
        if self.api_key.is_empty() {
            return Err(AnthropicError::Config("Anthropic API key not set".into()));
        }

        tracing::debug!(model = %self.model, max_tokens, "Sending completion request");

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens,
            messages: vec![Message::user(prompt)],
            system: None,
            temperature: Some(0.7),
        };

        let resp = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AnthropicError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: MessagesResponse = resp.json().await?;
        let tokens = response.usage.total();

        let text = response
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or(AnthropicError::EmptyResponse)?;

        Ok((text, tokens))
    }
}

/// Strip markdown code fences a model sometimes wraps JSON replies in.
pub fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_json_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_json_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("  plain text  "), "plain text");
    }

    #[test]
    fn defaults_model() {
        let client = AnthropicClient::new("key".to_string(), None);
        assert_eq!(client.model(), DEFAULT_MODEL);

        let client = AnthropicClient::new("key".to_string(), Some("claude-3-opus".into()));
        assert_eq!(client.model(), "claude-3-opus");
    }
}
