use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{SkinAnalysisRequest, SkinAnalysisResponse},
    routes::AppState,
};

/// Handler for skin tone analysis
pub async fn analyze_skin(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<SkinAnalysisRequest>, JsonRejection>,
) -> AppResult<Json<SkinAnalysisResponse>> {
    let Json(request) = payload?;
    let image = request
        .image
        .filter(|image| !image.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("No image provided".to_string()))?;

    let classifier = state.skin_classifier.as_ref().ok_or_else(|| {
        AppError::NotConfigured("Skin tone analysis is not configured".to_string())
    })?;

    tracing::info!(
        request_id = %request_id,
        image_chars = image.len(),
        provider = classifier.name(),
        "Processing skin analysis request"
    );

    match classifier.classify(&image).await {
        Ok(outcome) => {
            tracing::info!(request_id = %request_id, tone = outcome.label(), "Skin analysis done");
            Ok(Json(SkinAnalysisResponse::from(outcome)))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                provider = classifier.name(),
                error = %e,
                "Skin analysis upstream failure"
            );
            Err(AppError::ExternalApi(
                "Failed to connect to AI service.".to_string(),
            ))
        }
    }
}
