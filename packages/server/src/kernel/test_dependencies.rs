// Mock implementations for testing
//
// Provides mock services that can be injected into pipeline stages.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::traits::{BaseAI, Completion};

pub struct MockAI {
    responses: Arc<Mutex<Vec<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(text.to_string()));
        self
    }

    pub fn with_error(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    /// Prompts received so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<Completion> {
        self.calls.lock().unwrap().push(prompt.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            anyhow::bail!("MockAI has no queued responses");
        }
        match responses.remove(0) {
            Ok(text) => Ok(Completion {
                text,
                tokens_used: 42,
            }),
            Err(message) => anyhow::bail!(message),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
