use journal_relay_common::{AppConfig, Provider, RelayError, Result};
use journal_relay_llm::{client_for, LlmClient, QuestionGenerator, Summarizer};
use journal_relay_youtube::{VideoSearch, YouTubeClient};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state
///
/// A backend is `None` when its credentials are missing; routes that need it
/// answer 503 instead of failing at startup.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Per-provider entry summarizers
    pub summarizers: HashMap<Provider, Summarizer>,

    /// Follow-up questions on the configured provider
    pub questions: Option<QuestionGenerator>,

    /// Video search
    pub videos: Option<Arc<dyn VideoSearch>>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut clients: HashMap<Provider, Arc<dyn LlmClient>> = HashMap::new();

        for provider in [Provider::OpenAi, Provider::Anthropic, Provider::Ollama] {
            if config.provider_configured(provider) {
                clients.insert(provider, client_for(provider, &config)?);
            } else {
                warn!("{} is not configured; its routes will answer 503", provider.display_name());
            }
        }

        let questions = clients
            .get(&config.question_provider)
            .cloned()
            .map(QuestionGenerator::new);

        if questions.is_none() {
            warn!(
                "Question provider {} is not configured",
                config.question_provider.display_name()
            );
        }

        let videos: Option<Arc<dyn VideoSearch>> = if config.youtube_api_key.is_some() {
            Some(Arc::new(YouTubeClient::from_config(&config)?))
        } else {
            warn!("YOUTUBE_API_KEY is not set; video recommendations disabled");
            None
        };

        let summarizers = clients
            .into_iter()
            .map(|(provider, client)| (provider, Summarizer::new(client)))
            .collect();

        info!(
            "Application state ready - question provider: {}",
            config.question_provider
        );

        Ok(Self {
            config,
            summarizers,
            questions,
            videos,
        })
    }

    /// Summarizer for `provider`, or 503 when it is not configured
    pub fn summarizer(&self, provider: Provider) -> Result<&Summarizer> {
        self.summarizers.get(&provider).ok_or_else(|| {
            RelayError::unavailable(format!("{} is not configured", provider.display_name()))
        })
    }

    pub fn question_generator(&self) -> Result<&QuestionGenerator> {
        self.questions.as_ref().ok_or_else(|| {
            RelayError::unavailable(format!(
                "{} is not configured for question generation",
                self.config.question_provider.display_name()
            ))
        })
    }

    pub fn video_search(&self) -> Result<&dyn VideoSearch> {
        self.videos
            .as_deref()
            .ok_or_else(|| RelayError::unavailable("YouTube search is not configured"))
    }
}
