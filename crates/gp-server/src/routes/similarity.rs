//! Similarity endpoints

use axum::extract::State;
use axum::Json;

use crate::middleware::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;
use crate::types::{SimilarityRequest, SimilarityResponse};

/// POST /api/similarity
/// Score two texts with the requested (or default) method
#[utoipa::path(
    post,
    path = "/api/similarity",
    tag = "similarity",
    request_body = SimilarityRequest,
    responses(
        (status = 200, description = "Similarity score", body = SimilarityResponse),
        (status = 400, description = "Unknown method", body = crate::types::ErrorResponse)
    )
)]
pub async fn similarity(
    State(state): State<AppState>,
    Json(request): Json<SimilarityRequest>,
) -> ApiResult<Json<SimilarityResponse>> {
    let (score, method) = state
        .similarity
        .score_by_name(request.method.as_deref(), &request.text1, &request.text2)
        .map_err(|e| ApiErrorResponse::from(e).with_param("method"))?;

    Ok(Json(SimilarityResponse {
        similarity_score: score,
        method_used: method.to_string(),
    }))
}

/// GET /api/similarity/methods
/// List available similarity methods
#[utoipa::path(
    get,
    path = "/api/similarity/methods",
    tag = "similarity",
    responses(
        (status = 200, description = "Method identifiers", body = [String])
    )
)]
pub async fn list_methods(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(state.similarity.list_methods())
}
