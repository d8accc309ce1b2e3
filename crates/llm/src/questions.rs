//! Follow-up reflection questions
//!
//! Entries are rendered as a numbered prompt, sent once with a fixed system
//! instruction, and the reply must decode as a JSON array of exactly three
//! strings. Anything else is a failure; there are no partial results.

use journal_relay_common::http::truncate;
use journal_relay_common::{Provider, RelayError};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::llm_trait::LlmClient;
use crate::prompts::{numbered_entries, QUESTION_SYSTEM_INSTRUCTION};
use crate::types::CompletionRequest;

/// Exactly three questions, in the order the model produced them
pub type QuestionSet = [String; 3];

/// Longest slice of a rejected reply kept for diagnostics
const MAX_RAW_REPLY: usize = 500;

/// Why a model reply was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("reply is not valid JSON: {0}")]
    NotJson(String),

    #[error("expected a JSON array, got {0}")]
    NotAnArray(&'static str),

    #[error("expected 3 questions, got {0}")]
    WrongLength(usize),

    #[error("element {index} is {found}, expected a string")]
    WrongElementType { index: usize, found: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    /// No entries were supplied; the model was not called
    #[error("No journal entries provided")]
    InvalidInput,

    /// The model call itself failed
    #[error("Question generation failed: {0}")]
    Generation(#[source] RelayError),

    /// The model answered, but not with three strings
    #[error("Malformed model reply: {reason}")]
    MalformedReply {
        reason: MalformedReason,
        /// Reply text, truncated
        raw: String,
    },
}

impl QuestionError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::Generation(_) => 500,
            Self::MalformedReply { .. } => 502,
        }
    }
}

/// Generates follow-up questions from prior journal entries
#[derive(Clone)]
pub struct QuestionGenerator {
    client: Arc<dyn LlmClient>,
}

impl QuestionGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn provider(&self) -> Provider {
        self.client.provider()
    }

    /// Produce exactly three questions for `entries`
    pub async fn generate<S: AsRef<str>>(&self, entries: &[S]) -> Result<QuestionSet, QuestionError> {
        if entries.is_empty() {
            return Err(QuestionError::InvalidInput);
        }

        let prompt = numbered_entries(entries);
        info!(
            "Generating follow-up questions via {} - Entries: {}, Prompt length: {}",
            self.client.provider(),
            entries.len(),
            prompt.len()
        );

        let completion = self
            .client
            .complete(CompletionRequest::with_system(QUESTION_SYSTEM_INSTRUCTION, prompt))
            .await
            .map_err(|e| match e {
                // The provider answered but gave no usable text
                RelayError::Llm(message) => {
                    warn!("Empty reply from {}: {}", self.client.model(), message);
                    QuestionError::MalformedReply {
                        reason: MalformedReason::NotJson(message),
                        raw: String::new(),
                    }
                }
                other => QuestionError::Generation(other),
            })?;

        match parse_reply(&completion.text) {
            Ok(questions) => {
                debug!("Model {} returned 3 questions", completion.model);
                Ok(questions)
            }
            Err(reason) => {
                warn!("Rejected reply from {}: {}", completion.model, reason);
                Err(QuestionError::MalformedReply {
                    reason,
                    raw: truncate(&completion.text, MAX_RAW_REPLY),
                })
            }
        }
    }
}

/// Decode a reply into a [`QuestionSet`]
///
/// The reply must be JSON and must decode into `[String; 3]`. When decoding
/// fails, the value is examined only to say which constraint was broken.
pub fn parse_reply(raw: &str) -> Result<QuestionSet, MalformedReason> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| MalformedReason::NotJson(e.to_string()))?;

    <[String; 3]>::deserialize(&value).map_err(|_| explain_mismatch(&value))
}

fn explain_mismatch(value: &Value) -> MalformedReason {
    let items = match value {
        Value::Array(items) => items,
        other => return MalformedReason::NotAnArray(json_kind(other)),
    };

    match items.iter().position(|item| !item.is_string()) {
        Some(index) => MalformedReason::WrongElementType {
            index,
            found: json_kind(&items[index]),
        },
        None => MalformedReason::WrongLength(items.len()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
