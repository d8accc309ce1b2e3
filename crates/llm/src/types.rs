use serde::{Deserialize, Serialize};

/// One request/response exchange with a text generation backend
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Role/format instruction, sent through the provider's system channel
    pub system: Option<String>,

    /// User content
    pub prompt: String,
}

impl CompletionRequest {
    /// Prompt with no system instruction
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
        }
    }

    /// Prompt with a system instruction
    pub fn with_system(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            prompt: prompt.into(),
        }
    }

    /// Characters sent, system instruction included
    pub fn char_len(&self) -> usize {
        self.system.as_deref().map_or(0, |s| s.chars().count()) + self.prompt.chars().count()
    }
}

/// Token counts as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Generated text plus provider metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Generated text, untrimmed
    pub text: String,

    /// Model that produced the text
    pub model: String,

    /// Provider-reported usage, when available
    pub usage: Option<TokenUsage>,
}

/// Ollama generate request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name (e.g., "llama2:13b")
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// System prompt override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Disable streaming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Ollama generate response
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Model name
    pub model: String,

    /// Generated text
    pub response: String,

    /// Whether generation is complete
    #[serde(default)]
    pub done: bool,

    /// Prompt tokens evaluated
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,

    /// Tokens generated
    #[serde(default)]
    pub eval_count: Option<u32>,
}

impl GenerateResponse {
    /// Usage if Ollama reported both counters
    pub fn usage(&self) -> Option<TokenUsage> {
        match (self.prompt_eval_count, self.eval_count) {
            (Some(input_tokens), Some(output_tokens)) => Some(TokenUsage {
                input_tokens,
                output_tokens,
            }),
            _ => None,
        }
    }
}
