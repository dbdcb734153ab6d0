//! Service info and health endpoints

use axum::extract::State;
use axum::Json;

use crate::state::AppState;
use crate::types::{HealthResponse, ServiceInfoResponse};

/// GET /
/// Service metadata: endpoints, guardrails, similarity methods
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service info", body = ServiceInfoResponse)
    )
)]
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfoResponse> {
    let available_guardrails = state
        .registry
        .list()
        .into_iter()
        .map(|info| info.name)
        .collect();

    Json(ServiceInfoResponse {
        message: "Welcome to the Guardpost API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        available_endpoints: vec![
            "/api/input-guardrail".to_string(),
            "/api/output-guardrail".to_string(),
            "/api/similarity".to_string(),
            "/api/similarity/methods".to_string(),
            "/api/prediction".to_string(),
            "/api/guardrails".to_string(),
            "/api/health".to_string(),
        ],
        available_guardrails,
        available_similarity_methods: state
            .similarity
            .list_methods()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// GET /api/health
/// Liveness check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "API is running properly".to_string(),
    })
}
