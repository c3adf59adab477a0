// AI implementation using the Anthropic Messages API
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::{Context, Result};
use anthropic_client::{strip_json_fences, AnthropicClient};
use async_trait::async_trait;

use super::traits::{BaseAI, Completion};

const MAX_TOKENS: u32 = 1024;

/// Anthropic implementation of AI capabilities
pub struct AnthropicAI {
    client: AnthropicClient,
}

impl AnthropicAI {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: AnthropicClient::new(api_key, model),
        }
    }
}

#[async_trait]
impl BaseAI for AnthropicAI {
    async fn complete(&self, prompt: &str) -> Result<Completion> {
        tracing::debug!(
            prompt_length = prompt.len(),
            model = self.client.model(),
            "Calling Anthropic API"
        );

        let (text, tokens_used) = self
            .client
            .complete(prompt, MAX_TOKENS)
            .await
            .context("Failed to call Anthropic API")?;

        tracing::info!(
            response_length = text.len(),
            tokens_used,
            model = self.client.model(),
            "Anthropic API response received"
        );

        Ok(Completion { text, tokens_used })
    }

    async fn complete_json(&self, prompt: &str) -> Result<Completion> {
        let completion = self.complete(prompt).await?;
        Ok(Completion {
            text: strip_json_fences(&completion.text).to_string(),
            tokens_used: completion.tokens_used,
        })
    }

    fn model_name(&self) -> &str {
        self.client.model()
    }
}
