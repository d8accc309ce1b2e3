use actix_web::{post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{QuestionsRequest, QuestionsResponse};

/// Three follow-up questions for the given entries
#[post("/generate_questions")]
pub async fn generate_questions(
    req: web::Json<QuestionsRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let generator = state.question_generator()?;
    let questions = generator.generate(&req.entries).await?;

    info!(
        "Generated follow-up questions for {} entries via {}",
        req.entries.len(),
        generator.provider()
    );

    Ok(HttpResponse::Ok().json(QuestionsResponse {
        questions: questions.into(),
    }))
}
