// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "write a caption") should be domain functions that
// use these traits.

use anyhow::Result;
use async_trait::async_trait;

/// Completion from an LLM: the reply text plus total token usage.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub tokens_used: u64,
}

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<Completion>;

    /// Complete a prompt expecting JSON response (returns raw JSON string)
    /// Parse with serde_json::from_str in calling code
    async fn complete_json(&self, prompt: &str) -> Result<Completion> {
        // Default implementation calls complete
        self.complete(prompt).await
    }

    /// Model identifier recorded in generation logs
    fn model_name(&self) -> &str;
}
