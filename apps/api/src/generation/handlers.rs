//! Axum route handlers for document generation.

use axum::{extract::State, response::Response, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::document::DocumentKind;
use crate::errors::AppError;
use crate::extraction::extract;
use crate::generation::download::{docx_attachment, pdf_attachment, Layout};
use crate::generation::prompts::{
    build_cover_letter_prompt, build_cv_parse_prompt, build_cv_prompt, build_sop_prompt,
    SOP_MAX_TOKENS,
};
use crate::generation::request::{CoverLetterRequest, CvRequest, Fields, SopRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseCvRequest {
    #[serde(default)]
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct SopResponse {
    pub sop: String,
    pub word_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct SopDownloadRequest {
    #[serde(default)]
    pub sop: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/parse
///
/// Extracts a structured CV record from pasted CV text.
pub async fn handle_cv_parse(
    State(state): State<AppState>,
    Json(request): Json<ParseCvRequest>,
) -> Result<Json<Value>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }

    let raw = state
        .llm
        .complete(&build_cv_parse_prompt(&request.raw_text), None)
        .await?;
    let record = extract(&raw)?;

    info!("Parsed CV: {} top-level fields", record.as_object().map_or(0, |m| m.len()));
    Ok(Json(record))
}

/// POST /api/v1/cv/download/docx
pub async fn handle_cv_download(
    State(state): State<AppState>,
    Json(fields): Json<Fields>,
) -> Result<Response, AppError> {
    let request = CvRequest::from_fields(&fields)?;
    info!(
        "Generating CV: workflow={:?}, focus={:?}",
        request.workflow, request.focus
    );

    let raw = state.llm.complete(&build_cv_prompt(&request), None).await?;
    docx_attachment(DocumentKind::Cv, Layout::Structured, raw).await
}

/// POST /api/v1/cover-letter/download/docx
pub async fn handle_cover_letter_download(
    State(state): State<AppState>,
    Json(fields): Json<Fields>,
) -> Result<Response, AppError> {
    let request = CoverLetterRequest::from_fields(&fields)?;
    let today = chrono::Local::now().format("%B %d, %Y").to_string();

    let raw = state
        .llm
        .complete(&build_cover_letter_prompt(&request, &today), None)
        .await?;
    docx_attachment(DocumentKind::CoverLetter, Layout::PlainText, raw).await
}

/// POST /api/v1/sop
pub async fn handle_sop(
    State(state): State<AppState>,
    Json(fields): Json<Fields>,
) -> Result<Json<SopResponse>, AppError> {
    let request = SopRequest::from_fields(fields)?;

    let sop = state
        .llm
        .complete(&build_sop_prompt(&request), Some(SOP_MAX_TOKENS))
        .await?
        .trim()
        .to_string();
    let word_count = sop.split_whitespace().count();

    info!("Generated SOP: {word_count} words");
    Ok(Json(SopResponse { sop, word_count }))
}

/// POST /api/v1/sop/download/docx
pub async fn handle_sop_download(
    Json(request): Json<SopDownloadRequest>,
) -> Result<Response, AppError> {
    if request.sop.trim().is_empty() {
        return Err(AppError::Validation("SOP text is required".to_string()));
    }
    docx_attachment(
        DocumentKind::StatementOfPurpose,
        Layout::PlainText,
        request.sop,
    )
    .await
}

/// POST /api/v1/sop/download/pdf
pub async fn handle_sop_pdf_download(
    Json(request): Json<SopDownloadRequest>,
) -> Result<Response, AppError> {
    if request.sop.trim().is_empty() {
        return Err(AppError::Validation("SOP text is required".to_string()));
    }
    pdf_attachment(DocumentKind::StatementOfPurpose, request.sop).await
}
