//! OpenAPI specification generation
//!
//! Generates the OpenAPI 3.1 document from route annotations using utoipa.

use axum::response::IntoResponse;
use utoipa::OpenApi;

use crate::middleware::error::{ApiErrorResponse, ApiResult};

/// OpenAPI documentation builder
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Guardpost API",
        version = "0.1.0",
        description = "Text generation behind input/output guardrails and a similarity-driven prediction cache"
    ),
    paths(
        crate::routes::guardrails::check_input,
        crate::routes::guardrails::check_output,
        crate::routes::guardrails::list_guardrails,
        crate::routes::guardrails::get_guardrail,
        crate::routes::similarity::similarity,
        crate::routes::similarity::list_methods,
        crate::routes::prediction::prediction,
        crate::routes::system::root,
        crate::routes::system::health
    ),
    components(
        schemas(
            crate::types::GuardrailRequest,
            crate::types::SimilarityRequest,
            crate::types::SimilarityResponse,
            crate::types::PredictionRequest,
            crate::types::PredictionResponse,
            crate::types::ServiceInfoResponse,
            crate::types::HealthResponse,
            crate::types::ErrorResponse,
            crate::types::ApiError,
            gp_guardrails::GuardrailReport,
            gp_guardrails::GuardrailInfo,
            gp_guardrails::GuardrailDirection,
            gp_guardrails::Violation,
        )
    ),
    tags(
        (name = "guardrails", description = "Input/output text validation"),
        (name = "similarity", description = "Text similarity scoring"),
        (name = "prediction", description = "Cached text generation"),
        (name = "system", description = "Service health and information")
    )
)]
pub struct ApiDoc;

/// Get the OpenAPI specification as JSON
pub fn get_openapi_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ApiDoc::openapi())
}

/// Get the OpenAPI specification as YAML
pub fn get_openapi_yaml() -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&ApiDoc::openapi())
}

/// GET /openapi.json
pub async fn serve_openapi_json() -> ApiResult<impl IntoResponse> {
    let json = get_openapi_json()
        .map_err(|e| ApiErrorResponse::internal_error(format!("OpenAPI generation failed: {e}")))?;
    Ok(([("content-type", "application/json")], json))
}

/// GET /openapi.yaml
pub async fn serve_openapi_yaml() -> ApiResult<impl IntoResponse> {
    let yaml = get_openapi_yaml()
        .map_err(|e| ApiErrorResponse::internal_error(format!("OpenAPI generation failed: {e}")))?;
    Ok(([("content-type", "application/yaml")], yaml))
}
