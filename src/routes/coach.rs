use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{CoachTipRequest, CoachTipResponse},
    routes::AppState,
};

/// Handler for AI coaching tips
pub async fn get_coach_tip(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<CoachTipRequest>, JsonRejection>,
) -> AppResult<Json<CoachTipResponse>> {
    let Json(request) = payload?;
    let prompt = request
        .prompt
        .filter(|prompt| !prompt.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("No prompt provided".to_string()))?;

    let coach = state
        .coach
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("AI Coach is not configured".to_string()))?;

    tracing::info!(
        request_id = %request_id,
        prompt_chars = prompt.len(),
        provider = coach.name(),
        "Processing coach tip request"
    );

    let tip = coach.generate_tip(&prompt).await.map_err(|e| {
        tracing::error!(
            request_id = %request_id,
            provider = coach.name(),
            error = %e,
            "Coach tip upstream failure"
        );
        AppError::ExternalApi("Failed to connect to AI Coach.".to_string())
    })?;

    Ok(Json(CoachTipResponse { success: true, tip }))
}
