pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod provider;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::RelayError;
pub use provider::Provider;
pub type Result<T> = std::result::Result<T, RelayError>;
