use async_trait::async_trait;
use journal_relay_common::{Provider, Result};

use crate::types::{Completion, CompletionRequest};

/// Common trait for LLM clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and wait for the full reply
    async fn complete(&self, request: CompletionRequest) -> Result<Completion>;

    /// Backend this client talks to
    fn provider(&self) -> Provider;

    /// Model every request is sent to
    fn model(&self) -> &str;

    /// Test connection/availability
    async fn test_connection(&self) -> Result<bool> {
        Ok(true)
    }
}
