use async_trait::async_trait;
use journal_relay_common::{AppConfig, Provider, RelayError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use journal_relay_common::http::{build_http_client, ensure_success, transport_error};
use crate::llm_trait::LlmClient;
use crate::openai_client::ChatMessage;
use crate::types::{Completion, CompletionRequest, TokenUsage};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Messages API request body
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Anthropic messages API client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl AnthropicClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = build_http_client(timeout)?;

        info!("Anthropic client initialized: {} ({})", base_url, model);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .anthropic_api_key
            .as_deref()
            .ok_or_else(|| RelayError::config("ANTHROPIC_API_KEY is not set"))?;

        Self::new(
            &config.anthropic_base_url,
            api_key,
            &config.anthropic_model,
            config.request_timeout(),
        )
    }

    /// Cap on generated tokens (the messages API requires one)
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn build_request(&self, request: CompletionRequest) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: request.system,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
        }
    }

    fn parse_response(body: MessagesResponse) -> Result<Completion> {
        let text: String = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(RelayError::llm("Empty response from Anthropic"));
        }

        Ok(Completion {
            text,
            model: body.model,
            usage: body.usage.map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.build_request(request);

        debug!(
            "Sending messages request to Anthropic - Model: {}, Max tokens: {}",
            body.model, body.max_tokens
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Anthropic.display_name(), e))?;

        let parsed: MessagesResponse = ensure_success(Provider::Anthropic.display_name(), response)
            .await?
            .json()
            .await
            .map_err(|e| RelayError::llm(format!("Failed to parse Anthropic response: {}", e)))?;

        Self::parse_response(parsed)
    }

    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn model(&self) -> &str {
        &self.model
    }
}
