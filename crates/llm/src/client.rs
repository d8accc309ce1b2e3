use async_trait::async_trait;
use journal_relay_common::{AppConfig, Provider, RelayError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use journal_relay_common::http::{build_http_client, ensure_success, transport_error};
use crate::llm_trait::LlmClient;
use crate::types::{Completion, CompletionRequest, GenerateRequest, GenerateResponse};

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = build_http_client(timeout)?;

        info!("Ollama client initialized: {} ({})", base_url, model);
        Ok(Self {
            base_url,
            model,
            client,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.ollama_base_url,
            &config.ollama_model,
            config.request_timeout(),
        )
    }

    /// Non-streaming generate body for a completion request
    pub fn build_request(&self, request: CompletionRequest) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: request.prompt,
            system: request.system,
            stream: Some(false),
        }
    }

    /// Generate text with Ollama
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/api/generate", self.base_url);

        debug!(
            "Sending generate request to Ollama - Model: {}, Prompt length: {}",
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Ollama.display_name(), e))?;

        let result: GenerateResponse = ensure_success(Provider::Ollama.display_name(), response)
            .await?
            .json()
            .await
            .map_err(|e| RelayError::llm(format!("Failed to parse Ollama response: {}", e)))?;

        if result.response.is_empty() {
            return Err(RelayError::llm("Empty response from Ollama"));
        }

        debug!("Received response from Ollama - Length: {}", result.response.len());
        Ok(result)
    }

    /// Test connection to Ollama
    pub async fn ping(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Ollama.display_name(), e))?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let body = self.build_request(request);
        let response = self.generate(body).await?;
        let usage = response.usage();

        Ok(Completion {
            text: response.response,
            model: response.model,
            usage,
        })
    }

    fn provider(&self) -> Provider {
        Provider::Ollama
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn test_connection(&self) -> Result<bool> {
        self.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OllamaClient::new("http://localhost:11434/", "llama2:13b", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model(), "llama2:13b");
        assert_eq!(client.provider(), Provider::Ollama);
    }

    #[test]
    fn test_build_request_carries_system() {
        let client = OllamaClient::from_config(&AppConfig::default()).unwrap();
        let body = client.build_request(CompletionRequest::with_system("be brief", "entry"));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama2:13b");
        assert_eq!(json["system"], "be brief");
        assert_eq!(json["prompt"], "entry");
        assert_eq!(json["stream"], false);
    }
}
