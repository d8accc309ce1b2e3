//! Journal relay HTTP server
//!
//! Actix-web REST API in front of the LLM providers and YouTube search

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

pub use state::AppState;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use journal_relay_common::{AppConfig, RelayError, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::error::json_error_handler;

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    let bind_address = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!("Starting HTTP server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(routes::configure)
    })
    .bind(&bind_address)
    .map_err(|e| RelayError::config(format!("Failed to bind {}: {}", bind_address, e)))?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
