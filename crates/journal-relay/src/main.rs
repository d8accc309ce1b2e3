use anyhow::Result;
use clap::{Parser, Subcommand};
use journal_relay_common::logger::{init_logging, LogOutput};
use journal_relay_common::AppConfig;
use journal_relay_llm::{client_for, QuestionGenerator};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env from the project root, falling back to the working directory
fn load_dotenv_from_project_root() {
    match find_project_root().map(|root| root.join(".env")) {
        Some(env_path) if env_path.exists() => {
            dotenv::from_path(&env_path).ok();
        }
        _ => {
            dotenv::dotenv().ok();
        }
    }
}

#[derive(Parser)]
#[command(name = "journal-relay")]
#[command(about = "Journal relay - summaries, titles and follow-up questions for journal entries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print three follow-up questions for the given entries
    Questions {
        /// Journal entries, oldest first
        #[arg(required = true)]
        entries: Vec<String>,
    },
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }

    init_logging(&config, LogOutput::ConsoleAndFile)?;

    tracing::info!("Journal relay starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Question provider: {}", config.question_provider);
    tracing::info!("  Log dir: {}", config.log_dir.display());

    println!("Server listening on http://{}", config.server_bind_address());

    journal_relay_server::start_server(config).await?;
    Ok(())
}

async fn questions(config: AppConfig, entries: Vec<String>) -> Result<()> {
    init_logging(&config, LogOutput::Console)?;

    let client = client_for(config.question_provider, &config)?;
    let generator = QuestionGenerator::new(client);

    let questions = generator.generate(&entries).await?;
    for (i, question) in questions.iter().enumerate() {
        println!("{}. {}", i + 1, question);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();
    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await,
        Some(Commands::Questions { entries }) => questions(config, entries).await,
        None => serve(config, None, None).await,
    }
}
