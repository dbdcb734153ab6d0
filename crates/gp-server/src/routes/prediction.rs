//! POST /api/prediction
//!
//! The full pipeline: input guardrails → prediction cache → generation →
//! output guardrails. Blocked text is a 200 with `passed = false`; only
//! backend failures surface as HTTP errors.

use axum::extract::State;
use axum::Json;
use tracing::{info, warn};
use uuid::Uuid;

use gp_guardrails::Violation;

use crate::middleware::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;
use crate::types::{PredictionRequest, PredictionResponse};

const BLOCKED_INPUT: &str = "Unsafe input detected, prediction not generated.";
const BLOCKED_OUTPUT: &str = "Unsafe output detected, prediction not generated.";

/// POST /api/prediction
/// Generate a prediction, reusing a cached response for similar prompts
#[utoipa::path(
    post,
    path = "/api/prediction",
    tag = "prediction",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Prediction (or blocked result)", body = PredictionResponse),
        (status = 502, description = "Generation backend failure", body = crate::types::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::types::ErrorResponse)
    )
)]
pub async fn prediction(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> ApiResult<Json<PredictionResponse>> {
    let request_id = format!("pred-{}", Uuid::new_v4());

    let input_report = state.registry.validate_input(&request.input_text);
    if !input_report.passed {
        warn!(
            id = %request_id,
            violations = input_report.violations.len(),
            "input blocked by guardrails"
        );
        return Ok(Json(blocked(BLOCKED_INPUT, false, input_report.violations)));
    }

    // Input transformations (redactions) apply before the cache sees the
    // prompt, so equivalent sanitized prompts share cache entries.
    let prompt = input_report.text;

    let generator = state.generator.clone();
    let params = state.params.clone();
    let gen_prompt = prompt.clone();
    let outcome = state
        .cache
        .get_or_compute(&prompt, || async move {
            generator.generate(&gen_prompt, &params).await
        })
        .await
        .map_err(ApiErrorResponse::from)?;

    let output_report = state.registry.validate_output(&outcome.response);
    if !output_report.passed {
        warn!(
            id = %request_id,
            cache_hit = outcome.cache_hit,
            violations = output_report.violations.len(),
            "output blocked by guardrails"
        );
        return Ok(Json(blocked(
            BLOCKED_OUTPUT,
            outcome.cache_hit,
            output_report.violations,
        )));
    }

    info!(id = %request_id, cache_hit = outcome.cache_hit, "prediction served");

    Ok(Json(PredictionResponse {
        // Output transformations apply to cached responses too
        prediction: output_report.text,
        passed: true,
        cache_hit: outcome.cache_hit,
        matched_prompt: outcome.matched_prompt,
        similarity_score: outcome.similarity_score,
        violations: Vec::new(),
    }))
}

fn blocked(message: &str, cache_hit: bool, violations: Vec<Violation>) -> PredictionResponse {
    PredictionResponse {
        prediction: message.to_string(),
        passed: false,
        cache_hit,
        matched_prompt: None,
        similarity_score: None,
        violations,
    }
}
