//! Shared reqwest plumbing for the outbound API clients

use crate::error::RelayError;
use crate::Result;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Longest provider error body carried into an error message
const MAX_ERROR_BODY: usize = 300;

/// Build an HTTP client with the given request timeout
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RelayError::internal(format!("Failed to create HTTP client: {}", e)))
}

/// Map a transport failure to a network error
pub fn transport_error(service: &str, err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        RelayError::network(format!("{} request timed out", service))
    } else if err.is_connect() {
        RelayError::network(format!("Failed to connect to {}: {}", service, err))
    } else {
        RelayError::network(format!("{} request failed: {}", service, err))
    }
}

/// Pass 2xx responses through, turn anything else into a provider error
pub async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RelayError::provider(service, status.as_u16(), error_message(&body)))
}

/// Extract a human readable message from a provider error body
///
/// OpenAI, Anthropic and Google APIs use `{"error": {"message": ...}}`, Ollama
/// uses `{"error": "..."}`. Anything else is returned raw, shortened.
pub fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let error = &value["error"];
        if let Some(message) = error["message"].as_str().or_else(|| error.as_str()) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        truncate(trimmed, MAX_ERROR_BODY)
    }
}

/// Cut `text` to at most `max_chars` characters
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
