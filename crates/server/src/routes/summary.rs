use actix_web::{post, web, HttpResponse};
use journal_relay_common::Provider;
use journal_relay_llm::EntryTask;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{AnswerResponse, EntryRequest, SummaryResponse};

/// "On this day" summary from OpenAI
#[post("/summarize-entry")]
pub async fn summarize_entry(
    req: web::Json<EntryRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let entry = req.entry()?;
    let summary = state
        .summarizer(Provider::OpenAi)?
        .run(EntryTask::Summary, entry)
        .await?;

    Ok(HttpResponse::Ok().json(SummaryResponse { summary }))
}

/// Same summary instruction, answered by Anthropic
#[post("/anthropic_summarize_entry")]
pub async fn anthropic_summarize_entry(
    req: web::Json<EntryRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let entry = req.entry()?;
    let summary = state
        .summarizer(Provider::Anthropic)?
        .run(EntryTask::Summary, entry)
        .await?;

    Ok(HttpResponse::Ok().json(SummaryResponse { summary }))
}

/// Record-style summary from the self-hosted model
#[post("/ollama_summarize_entry")]
pub async fn ollama_summarize_entry(
    req: web::Json<EntryRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let entry = req.entry()?;
    let answer = state
        .summarizer(Provider::Ollama)?
        .run(EntryTask::RecordSummary, entry)
        .await?;

    Ok(HttpResponse::Ok().json(AnswerResponse { answer }))
}
