use crate::config::AppConfig;
use crate::error::RelayError;
use std::path::{Path, PathBuf};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Log file name inside the configured log directory
pub const LOG_FILE_NAME: &str = "journal-relay.log";

/// HTTP plumbing that is noisy at debug level
const QUIET_TARGETS: &[&str] = &["hyper=warn", "reqwest=warn", "h2=warn", "rustls=warn"];

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// stderr only, for one-shot CLI commands
    Console,
    /// stderr plus an append-only file in `log_dir`
    ConsoleAndFile,
}

/// Build the level filter. `RUST_LOG` wins over the configured level.
fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        QUIET_TARGETS.iter().fold(EnvFilter::new(log_level), |filter, directive| {
            match directive.parse() {
                Ok(d) => filter.add_directive(d),
                Err(_) => filter,
            }
        })
    })
}

/// Open (or create) the log file for appending
fn open_log_file(log_dir: &Path) -> Result<(std::fs::File, PathBuf), RelayError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        RelayError::config(format!(
            "Failed to create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    let path = log_dir.join(LOG_FILE_NAME);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            RelayError::config(format!("Failed to open log file {}: {}", path.display(), e))
        })?;

    Ok((file, path))
}

/// Initialize the global tracing subscriber from configuration
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &AppConfig, output: LogOutput) -> Result<(), RelayError> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(build_filter(&config.log_level));

    match output {
        LogOutput::Console => {
            tracing_subscriber::registry()
                .with(console_layer)
                .try_init()
                .map_err(|e| RelayError::internal(format!("Logging already initialized: {}", e)))?;

            tracing::debug!("Console logging initialized: level={}", config.log_level);
        }
        LogOutput::ConsoleAndFile => {
            let (log_file, log_path) = open_log_file(&config.log_dir)?;

            let file_layer = fmt::layer()
                .with_writer(log_file)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(build_filter(&config.log_level));

            tracing_subscriber::registry()
                .with(console_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| RelayError::internal(format!("Logging already initialized: {}", e)))?;

            tracing::info!(
                "Logging initialized: level={}, log_file={}",
                config.log_level,
                log_path.display()
            );
        }
    }

    Ok(())
}
