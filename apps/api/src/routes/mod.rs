pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::generation::handlers as generation;
use crate::scholarships::handlers as scholarships;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat
        .route("/api/v1/ask", post(chat::handle_ask))
        // CV and cover letter
        .route("/api/v1/cv/parse", post(generation::handle_cv_parse))
        .route(
            "/api/v1/cv/download/docx",
            post(generation::handle_cv_download),
        )
        .route(
            "/api/v1/cover-letter/download/docx",
            post(generation::handle_cover_letter_download),
        )
        // Statement of purpose
        .route("/api/v1/sop", post(generation::handle_sop))
        .route(
            "/api/v1/sop/download/docx",
            post(generation::handle_sop_download),
        )
        .route(
            "/api/v1/sop/download/pdf",
            post(generation::handle_sop_pdf_download),
        )
        // Scholarships
        .route(
            "/api/v1/scholarships",
            post(scholarships::handle_scholarships),
        )
        .with_state(state)
}
