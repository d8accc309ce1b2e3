use actix_web::web;

pub mod questions;
pub mod summary;
pub mod system;
pub mod title;
pub mod video;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(summary::summarize_entry)
        .service(summary::anthropic_summarize_entry)
        .service(summary::ollama_summarize_entry)
        .service(title::create_title)
        .service(title::title_generation)
        .service(questions::generate_questions)
        .service(video::recommend_video)
        .service(system::health);
}
