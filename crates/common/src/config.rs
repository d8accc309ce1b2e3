use crate::error::RelayError;
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// journal-relay application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenAI API key (OpenAI routes are disabled without it)
    #[serde(skip_serializing, default)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL
    pub openai_base_url: String,

    /// OpenAI chat model
    pub openai_model: String,

    /// Anthropic API key
    #[serde(skip_serializing, default)]
    pub anthropic_api_key: Option<String>,

    /// Anthropic API base URL
    pub anthropic_base_url: String,

    /// Anthropic messages model
    pub anthropic_model: String,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Ollama generate model
    pub ollama_model: String,

    /// YouTube Data API key
    #[serde(skip_serializing, default)]
    pub youtube_api_key: Option<String>,

    /// YouTube Data API base URL
    pub youtube_base_url: String,

    /// Provider used for follow-up questions
    pub question_provider: Provider,

    /// Outbound HTTP timeout in seconds
    pub request_timeout_secs: u64,

    /// Log estimated API cost after each completion
    pub log_cost_estimates: bool,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            anthropic_api_key: None,
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            anthropic_model: "claude-3-haiku-20240307".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama2:13b".to_string(),
            youtube_api_key: None,
            youtube_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            question_provider: Provider::OpenAi,
            request_timeout_secs: 60,
            log_cost_estimates: false,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, RelayError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Unset keys fall back to [`AppConfig::default`]. Blank API keys count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secret = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let question_provider = match lookup("QUESTION_PROVIDER") {
            Some(p) => p.parse()?,
            None => defaults.question_provider,
        };

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(s) => s.trim().parse().map_err(|_| {
                RelayError::config(format!("REQUEST_TIMEOUT_SECS is not a number: {}", s))
            })?,
            None => defaults.request_timeout_secs,
        };

        let server_port = match lookup("SERVER_PORT") {
            Some(s) => s.trim().parse().map_err(|_| {
                RelayError::config(format!("SERVER_PORT is not a valid port: {}", s))
            })?,
            None => defaults.server_port,
        };

        Ok(Self {
            openai_api_key: secret("OPENAI_API_KEY"),
            openai_base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: lookup("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            anthropic_api_key: secret("ANTHROPIC_API_KEY"),
            anthropic_base_url: lookup("ANTHROPIC_BASE_URL").unwrap_or(defaults.anthropic_base_url),
            anthropic_model: lookup("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
            ollama_base_url: lookup("OLLAMA_BASE_URL").unwrap_or(defaults.ollama_base_url),
            ollama_model: lookup("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            youtube_api_key: secret("YOUTUBE_API_KEY"),
            youtube_base_url: lookup("YOUTUBE_BASE_URL").unwrap_or(defaults.youtube_base_url),
            question_provider,
            request_timeout_secs,
            log_cost_estimates: lookup("LOG_COST_ESTIMATES")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(defaults.log_cost_estimates),
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            log_dir: lookup("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), RelayError> {
        if !self.log_dir.exists() {
            std::fs::create_dir_all(&self.log_dir).map_err(|e| {
                RelayError::config(format!(
                    "Failed to create directory {}: {}",
                    self.log_dir.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Outbound request timeout
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether the given provider has what it needs to be called
    pub fn provider_configured(&self, provider: Provider) -> bool {
        match provider {
            Provider::OpenAi => self.openai_api_key.is_some(),
            Provider::Anthropic => self.anthropic_api_key.is_some(),
            // Self-hosted, no credentials
            Provider::Ollama => true,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), RelayError> {
        let urls = [
            ("OpenAI", &self.openai_base_url),
            ("Anthropic", &self.anthropic_base_url),
            ("Ollama", &self.ollama_base_url),
            ("YouTube", &self.youtube_base_url),
        ];

        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(RelayError::config(format!(
                    "{} base URL must start with http:// or https://",
                    name
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(RelayError::config("Request timeout cannot be 0"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(RelayError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.question_provider, Provider::OpenAi);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("ANTHROPIC_API_KEY", "   "),
            ("QUESTION_PROVIDER", "ollama"),
            ("OLLAMA_BASE_URL", "http://backend:11434"),
            ("SERVER_PORT", "9000"),
            ("LOG_COST_ESTIMATES", "true"),
        ]))
        .unwrap();

        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.question_provider, Provider::Ollama);
        assert_eq!(config.ollama_base_url, "http://backend:11434");
        assert_eq!(config.server_port, 9000);
        assert!(config.log_cost_estimates);
        assert!(config.provider_configured(Provider::OpenAi));
        assert!(!config.provider_configured(Provider::Anthropic));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(AppConfig::from_lookup(lookup_from(&[("QUESTION_PROVIDER", "gemini")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "soon")])).is_err());

        let err = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
        assert!(AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "70000")])).is_err());
    }

    #[test]
    fn test_api_keys_not_serialized() {
        let mut config = AppConfig::default();
        config.openai_api_key = Some("sk-secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.ollama_base_url = "backend:11434".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.request_timeout_secs = 0;
        assert!(invalid_config.validate().is_err());
    }
}
