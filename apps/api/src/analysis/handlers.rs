//! Axum route handlers for the email analysis API.

use axum::{extract::State, Json};

use crate::analysis::analyzer::{analyze_email, EmailAnalysisRequest};
use crate::analysis::models::AnalysisResult;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/email/analyze
///
/// Always returns an analysis for a non-empty email: the model's when it
/// answers usefully, the heuristic's otherwise.
pub async fn handle_analyze_email(
    State(state): State<AppState>,
    Json(request): Json<EmailAnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if request.subject.trim().is_empty() && request.body.trim().is_empty() {
        return Err(AppError::Validation(
            "subject and body cannot both be empty".to_string(),
        ));
    }

    Ok(Json(analyze_email(state.llm.as_ref(), &request).await))
}
