use actix_web::{post, web, HttpResponse};
use journal_relay_common::Provider;
use journal_relay_llm::EntryTask;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{EntryRequest, SummaryResponse, TitleResponse};

#[post("/create_title")]
pub async fn create_title(
    req: web::Json<EntryRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let entry = req.entry()?;
    let title = state
        .summarizer(Provider::OpenAi)?
        .run(EntryTask::Title, entry)
        .await?;

    Ok(HttpResponse::Ok().json(TitleResponse { title }))
}

/// Title-generator persona. Existing clients read the title from `summary`.
#[post("/title_generation")]
pub async fn title_generation(
    req: web::Json<EntryRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let entry = req.entry()?;
    let summary = state
        .summarizer(Provider::OpenAi)?
        .run(EntryTask::GeneratedTitle, entry)
        .await?;

    Ok(HttpResponse::Ok().json(SummaryResponse { summary }))
}
