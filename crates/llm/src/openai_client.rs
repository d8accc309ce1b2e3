use async_trait::async_trait;
use journal_relay_common::{AppConfig, Provider, RelayError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use journal_relay_common::http::{build_http_client, ensure_success, transport_error};
use crate::llm_trait::LlmClient;
use crate::types::{Completion, CompletionRequest, TokenUsage};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    // null when the model refuses or calls a tool
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// OpenAI chat completions client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = build_http_client(timeout)?;

        info!("OpenAI client initialized: {} ({})", base_url, model);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model,
            client,
        })
    }

    /// Create client from configuration; fails when no API key is set
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or_else(|| RelayError::config("OPENAI_API_KEY is not set"))?;

        Self::new(
            &config.openai_base_url,
            api_key,
            &config.openai_model,
            config.request_timeout(),
        )
    }

    /// Chat body: optional system message followed by the user message
    pub fn build_request(&self, request: CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt,
        });

        ChatRequest {
            model: self.model.clone(),
            messages,
        }
    }

    fn parse_response(&self, body: ChatResponse) -> Result<Completion> {
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| RelayError::llm("Empty response from OpenAI"))?;

        Ok(Completion {
            text,
            model: body.model.unwrap_or_else(|| self.model.clone()),
            usage: body.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_request(request);

        debug!(
            "Sending chat request to OpenAI - Model: {}, Messages: {}",
            body.model,
            body.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(Provider::OpenAi.display_name(), e))?;

        let parsed: ChatResponse = ensure_success(Provider::OpenAi.display_name(), response)
            .await?
            .json()
            .await
            .map_err(|e| RelayError::llm(format!("Failed to parse OpenAI response: {}", e)))?;

        self.parse_response(parsed)
    }

    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiClient {
        OpenAiClient::new("https://api.openai.com/v1/", "sk-test", "gpt-3.5-turbo", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_from_config_requires_key() {
        assert!(OpenAiClient::from_config(&AppConfig::default()).is_err());

        let mut config = AppConfig::default();
        config.openai_api_key = Some("sk-test".to_string());
        let client = OpenAiClient::from_config(&config).unwrap();
        assert_eq!(client.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_build_request_orders_messages() {
        let body = client().build_request(CompletionRequest::with_system("Create a title", "my day"));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "Create a title");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "my day");
    }

    #[test]
    fn test_build_request_without_system() {
        let body = client().build_request(CompletionRequest::new("just this"));
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
    }

    #[test]
    fn test_parse_response() {
        let body: ChatResponse = serde_json::from_str(
            r#"{
                "model": "gpt-3.5-turbo-0125",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "On this day you slept poorly."}}],
                "usage": {"prompt_tokens": 40, "completion_tokens": 8, "total_tokens": 48}
            }"#,
        )
        .unwrap();

        let completion = client().parse_response(body).unwrap();
        assert_eq!(completion.text, "On this day you slept poorly.");
        assert_eq!(completion.model, "gpt-3.5-turbo-0125");
        assert_eq!(
            completion.usage,
            Some(TokenUsage { input_tokens: 40, output_tokens: 8 })
        );
    }

    #[test]
    fn test_parse_response_without_content() {
        let body: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#).unwrap();
        assert!(matches!(client().parse_response(body), Err(RelayError::Llm(_))));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(client().parse_response(empty).is_err());
    }
}
