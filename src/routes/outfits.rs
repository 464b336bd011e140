use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{OutfitRequest, OutfitResponse},
    routes::AppState,
};

/// Handler for outfit recommendations.
///
/// Missing data for the requested combination is an empty list, not an error.
pub async fn get_outfit(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<OutfitRequest>, JsonRejection>,
) -> AppResult<Json<OutfitResponse>> {
    let Json(request) = payload?;
    let query = request.validate()?;

    tracing::info!(
        request_id = %request_id,
        gender = %query.gender,
        skin_tone = %query.skin_tone,
        occasion = %query.occasion,
        count = query.count,
        "Processing outfit request"
    );

    let outfits = state.recommender.recommend(&query).await?;

    tracing::info!(
        request_id = %request_id,
        returned = outfits.len(),
        "Outfits recommended"
    );

    Ok(Json(OutfitResponse {
        success: true,
        outfits,
    }))
}
