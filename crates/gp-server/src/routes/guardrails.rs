//! Guardrail endpoints
//!
//! Validation failures are normal responses (`passed = false`), never
//! HTTP errors; only unknown guardrail names map to an error status.

use axum::extract::{Path, State};
use axum::Json;

use gp_guardrails::{GuardrailInfo, GuardrailReport};

use crate::middleware::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;
use crate::types::GuardrailRequest;

/// POST /api/input-guardrail
/// Run all input guardrails against a text
#[utoipa::path(
    post,
    path = "/api/input-guardrail",
    tag = "guardrails",
    request_body = GuardrailRequest,
    responses(
        (status = 200, description = "Guardrail report", body = GuardrailReport),
        (status = 500, description = "Internal server error", body = crate::types::ErrorResponse)
    )
)]
pub async fn check_input(
    State(state): State<AppState>,
    Json(request): Json<GuardrailRequest>,
) -> Json<GuardrailReport> {
    Json(state.registry.validate_input(&request.text))
}

/// POST /api/output-guardrail
/// Run all output guardrails against a text
#[utoipa::path(
    post,
    path = "/api/output-guardrail",
    tag = "guardrails",
    request_body = GuardrailRequest,
    responses(
        (status = 200, description = "Guardrail report", body = GuardrailReport),
        (status = 500, description = "Internal server error", body = crate::types::ErrorResponse)
    )
)]
pub async fn check_output(
    State(state): State<AppState>,
    Json(request): Json<GuardrailRequest>,
) -> Json<GuardrailReport> {
    Json(state.registry.validate_output(&request.text))
}

/// GET /api/guardrails
/// List every configured guardrail
#[utoipa::path(
    get,
    path = "/api/guardrails",
    tag = "guardrails",
    responses(
        (status = 200, description = "Configured guardrails", body = [GuardrailInfo])
    )
)]
pub async fn list_guardrails(State(state): State<AppState>) -> Json<Vec<GuardrailInfo>> {
    Json(state.registry.list())
}

/// GET /api/guardrails/{name}
/// Detail for one configured guardrail
#[utoipa::path(
    get,
    path = "/api/guardrails/{name}",
    tag = "guardrails",
    params(
        ("name" = String, Path, description = "Guardrail name")
    ),
    responses(
        (status = 200, description = "Guardrail detail", body = GuardrailInfo),
        (status = 404, description = "Unknown guardrail", body = crate::types::ErrorResponse)
    )
)]
pub async fn get_guardrail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<GuardrailInfo>> {
    let info = state.registry.get(&name).map_err(ApiErrorResponse::from)?;
    Ok(Json(info))
}
