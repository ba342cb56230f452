//! Axum route handler for scholarship recommendations.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::request::{require_fields, Fields};
use crate::scholarships::prompts::{build_scholarship_prompt, SCHOLARSHIP_REQUIRED_FIELDS};
use crate::scholarships::{parse_scholarships, Scholarship};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScholarshipsResponse {
    pub scholarships: Vec<Scholarship>,
}

/// POST /api/v1/scholarships
pub async fn handle_scholarships(
    State(state): State<AppState>,
    Json(fields): Json<Fields>,
) -> Result<Json<ScholarshipsResponse>, AppError> {
    require_fields(&fields, SCHOLARSHIP_REQUIRED_FIELDS)?;

    let raw = state
        .llm
        .complete(&build_scholarship_prompt(&fields), None)
        .await?;
    let scholarships = parse_scholarships(&raw)?;

    info!("Recommended {} scholarships", scholarships.len());
    Ok(Json(ScholarshipsResponse { scholarships }))
}
