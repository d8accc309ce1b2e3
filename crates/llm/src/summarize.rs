use journal_relay_common::{Provider, RelayError, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::prompts::{
    record_summary_prompt, SUMMARY_INSTRUCTION, TITLE_GENERATOR_INSTRUCTION, TITLE_INSTRUCTION,
};
use crate::types::CompletionRequest;

/// Single-entry jobs the service relays to a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTask {
    /// Second-person "On this day" summary
    Summary,
    /// Title for arbitrary content
    Title,
    /// Short unquoted title from the title-generator persona
    GeneratedTitle,
    /// Short record-style summary for models without a system channel
    RecordSummary,
}

impl EntryTask {
    /// Request for this task over one journal entry
    pub fn request(&self, entry: &str) -> CompletionRequest {
        match self {
            Self::Summary => CompletionRequest::with_system(SUMMARY_INSTRUCTION, entry),
            Self::Title => CompletionRequest::with_system(TITLE_INSTRUCTION, entry),
            Self::GeneratedTitle => CompletionRequest::with_system(TITLE_GENERATOR_INSTRUCTION, entry),
            Self::RecordSummary => CompletionRequest::new(record_summary_prompt(entry)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Title => "title",
            Self::GeneratedTitle => "generated_title",
            Self::RecordSummary => "record_summary",
        }
    }
}

/// Runs [`EntryTask`]s against one client and relays the reply text
#[derive(Clone)]
pub struct Summarizer {
    client: Arc<dyn LlmClient>,
}

impl Summarizer {
    /// Create new summarizer
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn provider(&self) -> Provider {
        self.client.provider()
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Whether the backend answers at all
    pub async fn test_connection(&self) -> Result<bool> {
        self.client.test_connection().await
    }

    /// Run `task` over `entry` and return the model's text as-is
    pub async fn run(&self, task: EntryTask, entry: &str) -> Result<String> {
        if entry.trim().is_empty() {
            return Err(RelayError::invalid_input("No journal entry provided"));
        }

        info!(
            "Running {} via {} - Entry length: {} chars",
            task.name(),
            self.client.provider(),
            entry.len()
        );

        let completion = self.client.complete(task.request(entry)).await?;
        debug!("{} reply from {} - Length: {}", task.name(), completion.model, completion.text.len());

        Ok(completion.text)
    }
}
