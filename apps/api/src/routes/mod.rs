pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::state::AppState;
use crate::study::handlers;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Edital metadata
        .route(
            "/api/v1/notices/extract",
            post(handlers::handle_extract_notice),
        )
        .route(
            "/api/v1/notices/search",
            post(handlers::handle_search_notice),
        )
        // Study material
        .route("/api/v1/roadmaps", post(handlers::handle_extract_roadmap))
        .route(
            "/api/v1/questions",
            post(handlers::handle_generate_questions),
        )
        .route("/api/v1/completions", post(handlers::handle_completion))
        // Documents
        .route("/api/v1/documents", post(documents::handle_upload))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
