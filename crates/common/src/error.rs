/// journal-relay error types
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// LLM related error (reply unusable, empty output)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Upstream provider answered with a non-success status
    #[error("{provider} returned {status}: {message}")]
    Provider {
        provider: String,
        status: u16,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// A provider needed by the request is not configured
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RelayError {
    /// Create LLM error
    pub fn llm<S: Into<String>>(msg: S) -> Self {
        Self::Llm(msg.into())
    }

    /// Create provider error from an upstream status and message
    pub fn provider<P: Into<String>, M: Into<String>>(provider: P, status: u16, message: M) -> Self {
        Self::Provider {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create unavailable error
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion
impl RelayError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Llm(_) => 500,
            Self::Provider { .. } => 500,
            Self::Network(_) => 503,
            Self::Unavailable(_) => 503,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::invalid_input("x").status_code(), 400);
        assert_eq!(RelayError::not_found("x").status_code(), 404);
        assert_eq!(RelayError::network("x").status_code(), 503);
        assert_eq!(RelayError::unavailable("x").status_code(), 503);
        assert_eq!(RelayError::provider("OpenAI", 429, "slow down").status_code(), 500);
    }

    #[test]
    fn test_provider_message() {
        let err = RelayError::provider("Anthropic", 401, "invalid x-api-key");
        assert_eq!(err.to_string(), "Anthropic returned 401: invalid x-api-key");
    }
}
