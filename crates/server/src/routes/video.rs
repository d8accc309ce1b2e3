use actix_web::{post, web, HttpResponse};
use journal_relay_common::RelayError;
use journal_relay_youtube::{search_query, DEFAULT_MAX_TERMS};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{EntryRequest, VideoResponse};

/// YouTube video matching the entry's most frequent words
#[post("/recommend_video")]
pub async fn recommend_video(
    req: web::Json<EntryRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let entry = req.entry()?;
    let search = state.video_search()?;

    let query = search_query(entry, DEFAULT_MAX_TERMS);
    if query.is_empty() {
        return Err(RelayError::invalid_input("No searchable words in journal entry").into());
    }

    info!("Recommending video - Query: {}", query);

    let hit = search
        .search_first(&query)
        .await?
        .ok_or_else(|| RelayError::not_found(format!("No video found for \"{}\"", query)))?;

    Ok(HttpResponse::Ok().json(VideoResponse {
        url: hit.url(),
        query,
        title: hit.title,
    }))
}
