//! Optional usage reporting around any [`LlmClient`]
//!
//! The clients themselves never log cost. Wrap one in [`Observed`] to have
//! every successful completion reported to a [`UsageObserver`].

use async_trait::async_trait;
use journal_relay_common::{Provider, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::llm_trait::LlmClient;
use crate::types::{Completion, CompletionRequest, TokenUsage};

/// Rough characters-per-token ratio for English text
const CHARS_PER_TOKEN: usize = 4;

/// One finished completion
#[derive(Debug, Clone)]
pub struct UsageEvent<'a> {
    pub provider: Provider,
    pub model: &'a str,
    pub prompt_chars: usize,
    pub reply_chars: usize,
    /// Provider-reported usage, if any
    pub usage: Option<TokenUsage>,
    pub elapsed: Duration,
}

impl UsageEvent<'_> {
    /// Reported usage, or an estimate from text length
    pub fn tokens(&self) -> TokenUsage {
        self.usage.unwrap_or(TokenUsage {
            input_tokens: estimate_tokens(self.prompt_chars),
            output_tokens: estimate_tokens(self.reply_chars),
        })
    }
}

pub trait UsageObserver: Send + Sync {
    fn observe(&self, event: &UsageEvent<'_>);
}

/// Token estimate for a text length
pub fn estimate_tokens(chars: usize) -> u32 {
    u32::try_from(chars.div_ceil(CHARS_PER_TOKEN)).unwrap_or(u32::MAX)
}

/// USD per million (input, output) tokens, matched by model prefix
const PRICES: &[(&str, f64, f64)] = &[
    ("gpt-4o-mini", 0.15, 0.60),
    ("gpt-4o", 2.50, 10.00),
    ("gpt-4-turbo", 10.00, 30.00),
    ("gpt-4", 30.00, 60.00),
    ("gpt-3.5-turbo", 0.50, 1.50),
    ("claude-3-haiku", 0.25, 1.25),
    ("claude-3-5-haiku", 0.80, 4.00),
    ("claude-3-5-sonnet", 3.00, 15.00),
    ("claude-3-sonnet", 3.00, 15.00),
    ("claude-3-opus", 15.00, 75.00),
];

/// Estimated USD cost, `None` for unknown hosted models
pub fn estimate_cost(provider: Provider, model: &str, tokens: TokenUsage) -> Option<f64> {
    if provider == Provider::Ollama {
        // Self-hosted
        return Some(0.0);
    }

    PRICES
        .iter()
        .find(|(prefix, _, _)| model.starts_with(prefix))
        .map(|(_, input, output)| {
            (tokens.input_tokens as f64 * input + tokens.output_tokens as f64 * output) / 1_000_000.0
        })
}

/// Logs an estimated cost per completion at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct CostEstimator;

impl UsageObserver for CostEstimator {
    fn observe(&self, event: &UsageEvent<'_>) {
        let tokens = event.tokens();
        match estimate_cost(event.provider, event.model, tokens) {
            Some(cost) => debug!(
                "Estimated cost for {} ({}): ${:.6} - input {} tokens, output {} tokens, {:?}",
                event.provider,
                event.model,
                cost,
                tokens.input_tokens,
                tokens.output_tokens,
                event.elapsed
            ),
            None => debug!(
                "No price known for {} ({}) - input {} tokens, output {} tokens, {:?}",
                event.provider, event.model, tokens.input_tokens, tokens.output_tokens, event.elapsed
            ),
        }
    }
}

/// [`LlmClient`] decorator reporting each successful completion
pub struct Observed {
    inner: Arc<dyn LlmClient>,
    observer: Arc<dyn UsageObserver>,
}

impl Observed {
    pub fn new(inner: Arc<dyn LlmClient>, observer: Arc<dyn UsageObserver>) -> Self {
        Self { inner, observer }
    }
}

#[async_trait]
impl LlmClient for Observed {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let prompt_chars = request.char_len();
        let started = Instant::now();

        let completion = self.inner.complete(request).await?;

        self.observer.observe(&UsageEvent {
            provider: self.inner.provider(),
            model: &completion.model,
            prompt_chars,
            reply_chars: completion.text.chars().count(),
            usage: completion.usage,
            elapsed: started.elapsed(),
        });

        Ok(completion)
    }

    fn provider(&self) -> Provider {
        self.inner.provider()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn test_connection(&self) -> Result<bool> {
        self.inner.test_connection().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_relay_common::RelayError;
    use std::sync::Mutex;

    struct FixedClient {
        fail: bool,
    }

    #[async_trait]
    impl LlmClient for FixedClient {
        async fn complete(&self, _request: CompletionRequest) -> Result<Completion> {
            if self.fail {
                return Err(RelayError::network("down"));
            }
            Ok(Completion {
                text: "12345678".to_string(),
                model: "gpt-3.5-turbo-0125".to_string(),
                usage: None,
            })
        }

        fn provider(&self) -> Provider {
            Provider::OpenAi
        }

        fn model(&self) -> &str {
            "gpt-3.5-turbo"
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(String, usize, usize)>>,
    }

    impl UsageObserver for Recorder {
        fn observe(&self, event: &UsageEvent<'_>) {
            self.events
                .lock()
                .unwrap()
                .push((event.model.to_string(), event.prompt_chars, event.reply_chars));
        }
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(0), 0);
        assert_eq!(estimate_tokens(1), 1);
        assert_eq!(estimate_tokens(8), 2);
        assert_eq!(estimate_tokens(9), 3);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_estimate_tokens_saturates() {
        assert_eq!(estimate_tokens(usize::MAX), u32::MAX);
        assert_eq!(estimate_tokens(u32::MAX as usize * 4 + 4), u32::MAX);
    }

    #[test]
    fn test_estimate_cost() {
        let tokens = TokenUsage {
            input_tokens: 1_000_000,
            output_tokens: 1_000_000,
        };
        let cost = estimate_cost(Provider::OpenAi, "gpt-3.5-turbo-0125", tokens).unwrap();
        assert!((cost - 2.0).abs() < 1e-9);

        // Longer prefix wins over "gpt-4o"
        let mini = estimate_cost(Provider::OpenAi, "gpt-4o-mini", tokens).unwrap();
        assert!((mini - 0.75).abs() < 1e-9);

        assert_eq!(estimate_cost(Provider::Ollama, "llama2:13b", tokens), Some(0.0));
        assert_eq!(estimate_cost(Provider::OpenAi, "mystery-model", tokens), None);
    }

    #[test]
    fn test_event_prefers_reported_usage() {
        let reported = TokenUsage {
            input_tokens: 7,
            output_tokens: 2,
        };
        let event = UsageEvent {
            provider: Provider::Anthropic,
            model: "claude-3-haiku-20240307",
            prompt_chars: 400,
            reply_chars: 40,
            usage: Some(reported),
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(event.tokens(), reported);

        let estimated = UsageEvent { usage: None, ..event };
        assert_eq!(estimated.tokens().input_tokens, 100);
        assert_eq!(estimated.tokens().output_tokens, 10);
    }

    #[tokio::test]
    async fn test_observed_reports_success_only() {
        let recorder = Arc::new(Recorder::default());

        let ok = Observed::new(Arc::new(FixedClient { fail: false }), recorder.clone());
        let completion = ok
            .complete(CompletionRequest::with_system("sys", "prompt"))
            .await
            .unwrap();
        assert_eq!(completion.text, "12345678");
        assert_eq!(ok.model(), "gpt-3.5-turbo");

        let failing = Observed::new(Arc::new(FixedClient { fail: true }), recorder.clone());
        assert!(failing.complete(CompletionRequest::new("prompt")).await.is_err());

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], ("gpt-3.5-turbo-0125".to_string(), 9, 8));
    }
}
