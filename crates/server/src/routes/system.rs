use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use futures::future::join_all;
use journal_relay_common::Provider;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::state::AppState;
use crate::types::{HealthQuery, HealthResponse, ProviderStatus};

const PROVIDERS: [Provider; 3] = [Provider::OpenAi, Provider::Anthropic, Provider::Ollama];

/// Which backends are wired up; `?probe=true` also contacts them
#[get("/health")]
pub async fn health(
    query: web::Query<HealthQuery>,
    state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    let probes = PROVIDERS.iter().map(|provider| {
        let summarizer = state.summarizers.get(provider);
        let probe = query.probe;
        async move {
            match summarizer {
                Some(s) if probe => match s.test_connection().await {
                    Ok(reachable) => Some(reachable),
                    Err(e) => {
                        warn!("{} probe failed: {}", provider.display_name(), e);
                        Some(false)
                    }
                },
                _ => None,
            }
        }
    });
    let reachability = join_all(probes).await;

    let providers: Vec<ProviderStatus> = PROVIDERS
        .iter()
        .zip(reachability)
        .map(|(provider, reachable)| {
            let summarizer = state.summarizers.get(provider);
            ProviderStatus {
                name: provider.to_string(),
                configured: summarizer.is_some(),
                model: summarizer.map(|s| s.model().to_string()),
                reachable,
            }
        })
        .collect();

    let degraded = providers.iter().any(|p| p.reachable == Some(false));
    debug!("Health check - probe: {}, degraded: {}", query.probe, degraded);

    HttpResponse::Ok().json(HealthResponse {
        status: if degraded { "degraded" } else { "ok" }.to_string(),
        time: Utc::now(),
        question_provider: state.config.question_provider.to_string(),
        providers,
        youtube: state.videos.is_some(),
    })
}
