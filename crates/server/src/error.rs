use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use journal_relay_common::RelayError;
use journal_relay_llm::QuestionError;
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// Error returned by route handlers, rendered as `{"error": ...}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error(transparent)]
    Questions(#[from] QuestionError),
}

impl ApiError {
    /// Client-facing message; caller mistakes are reported without a prefix
    fn message(&self) -> String {
        match self {
            Self::Relay(RelayError::InvalidInput(m))
            | Self::Relay(RelayError::NotFound(m))
            | Self::Relay(RelayError::Unavailable(m)) => m.clone(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Questions(QuestionError::MalformedReply { raw, .. }) => Some(raw.clone()),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::Relay(e) => e.status_code(),
            Self::Questions(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status.as_u16(), self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.message(),
            details: self.details(),
        })
    }
}

/// Undecodable JSON bodies get the same error shape as everything else
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: format!("Invalid JSON body: {}", err),
        details: None,
    });
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_relay_llm::MalformedReason;

    #[test]
    fn test_status_mapping() {
        let invalid: ApiError = RelayError::invalid_input("No journal entry provided").into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let unavailable: ApiError = RelayError::unavailable("OpenAI is not configured").into();
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let malformed: ApiError = QuestionError::MalformedReply {
            reason: MalformedReason::WrongLength(2),
            raw: r#"["a","b"]"#.to_string(),
        }
        .into();
        assert_eq!(malformed.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(malformed.details().as_deref(), Some(r#"["a","b"]"#));

        let generation: ApiError = QuestionError::Generation(RelayError::network("down")).into();
        assert_eq!(generation.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_messages() {
        let err: ApiError = RelayError::invalid_input("No journal entry provided").into();
        assert_eq!(err.message(), "No journal entry provided");

        let err: ApiError = RelayError::provider("OpenAI", 429, "Rate limit reached").into();
        assert_eq!(err.message(), "OpenAI returned 429: Rate limit reached");

        let err: ApiError = QuestionError::InvalidInput.into();
        assert_eq!(err.message(), "No journal entries provided");
    }
}
