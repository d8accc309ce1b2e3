//! journal-relay LLM integration
//!
//! Provider clients behind one [`LlmClient`] trait, the fixed journal prompts,
//! and the follow-up question pipeline.

mod anthropic_client;
mod client;
mod llm_trait;
mod openai_client;
mod prompts;
mod questions;
mod summarize;
mod types;
mod usage;

use journal_relay_common::{AppConfig, Provider, Result};
use std::sync::Arc;

pub use anthropic_client::AnthropicClient;
pub use client::OllamaClient;
pub use llm_trait::LlmClient;
pub use openai_client::OpenAiClient;
pub use prompts::{
    numbered_entries, record_summary_prompt, QUESTION_SYSTEM_INSTRUCTION, SUMMARY_INSTRUCTION,
    TITLE_GENERATOR_INSTRUCTION, TITLE_INSTRUCTION,
};
pub use questions::{parse_reply, MalformedReason, QuestionError, QuestionGenerator, QuestionSet};
pub use summarize::{EntryTask, Summarizer};
pub use types::{Completion, CompletionRequest, TokenUsage};
pub use usage::{estimate_cost, estimate_tokens, CostEstimator, Observed, UsageEvent, UsageObserver};

/// Build the client for `provider` from configuration
///
/// Fails when the provider needs an API key that is not set. With
/// `log_cost_estimates` on, the client is wrapped in [`Observed`].
pub fn client_for(provider: Provider, config: &AppConfig) -> Result<Arc<dyn LlmClient>> {
    let client: Arc<dyn LlmClient> = match provider {
        Provider::OpenAi => Arc::new(OpenAiClient::from_config(config)?),
        Provider::Anthropic => Arc::new(AnthropicClient::from_config(config)?),
        Provider::Ollama => Arc::new(OllamaClient::from_config(config)?),
    };

    if config.log_cost_estimates {
        Ok(Arc::new(Observed::new(client, Arc::new(CostEstimator))))
    } else {
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_for_respects_credentials() {
        let config = AppConfig::default();
        assert!(client_for(Provider::OpenAi, &config).is_err());
        assert!(client_for(Provider::Anthropic, &config).is_err());

        let ollama = client_for(Provider::Ollama, &config).unwrap();
        assert_eq!(ollama.provider(), Provider::Ollama);
        assert_eq!(ollama.model(), "llama2:13b");
    }

    #[test]
    fn test_client_for_wraps_observer() {
        let mut config = AppConfig::default();
        config.anthropic_api_key = Some("sk-ant-test".to_string());
        config.log_cost_estimates = true;

        let client = client_for(Provider::Anthropic, &config).unwrap();
        assert_eq!(client.provider(), Provider::Anthropic);
        assert_eq!(client.model(), "claude-3-haiku-20240307");
    }
}
