use chrono::{DateTime, Utc};
use journal_relay_common::RelayError;
use serde::{Deserialize, Serialize};

/// Body for every single-entry route
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    /// Journal entry text
    #[serde(default)]
    pub journal_entry: Option<String>,
}

impl EntryRequest {
    /// The entry, rejecting missing or blank text
    pub fn entry(&self) -> Result<&str, RelayError> {
        match self.journal_entry.as_deref() {
            Some(entry) if !entry.trim().is_empty() => Ok(entry),
            _ => Err(RelayError::invalid_input("No journal entry provided")),
        }
    }
}

/// Follow-up questions request
#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    /// Prior journal entries, oldest first
    #[serde(default)]
    pub entries: Vec<String>,
}

/// Summary response
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Title response
#[derive(Debug, Serialize, Deserialize)]
pub struct TitleResponse {
    pub title: String,
}

/// Record-style summary from the self-hosted model
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Follow-up questions response
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

/// Video recommendation response
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoResponse {
    /// Watch URL
    pub url: String,

    /// Query sent to search
    pub query: String,

    /// Video title, when search returned one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Error body shared by every route
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// One backend as seen by the health check
#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Only filled when probing was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reachable: Option<bool>,
}

/// Health check query
#[derive(Debug, Deserialize)]
pub struct HealthQuery {
    /// Contact each configured backend
    #[serde(default)]
    pub probe: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub time: DateTime<Utc>,
    pub question_provider: String,
    pub providers: Vec<ProviderStatus>,
    pub youtube: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_request_validation() {
        let ok: EntryRequest = serde_json::from_str(r#"{"journal_entry": "walked the dog"}"#).unwrap();
        assert_eq!(ok.entry().unwrap(), "walked the dog");

        let missing: EntryRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.entry().is_err());

        let blank: EntryRequest = serde_json::from_str(r#"{"journal_entry": "  "}"#).unwrap();
        assert!(blank.entry().is_err());

        let null: EntryRequest = serde_json::from_str(r#"{"journal_entry": null}"#).unwrap();
        assert!(null.entry().is_err());
    }

    #[test]
    fn test_questions_request_defaults_to_empty() {
        let request: QuestionsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.entries.is_empty());
    }
}
