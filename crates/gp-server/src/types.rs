//! API request and response types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use gp_guardrails::Violation;

/// GET / response: service metadata and discovery info
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub version: String,
    pub available_endpoints: Vec<String>,
    pub available_guardrails: Vec<String>,
    pub available_similarity_methods: Vec<String>,
}

/// Body for guardrail check endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuardrailRequest {
    /// Text to validate
    #[schema(example = "SELECT name FROM users")]
    pub text: String,
}

/// Body for POST /api/similarity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimilarityRequest {
    pub text1: String,
    pub text2: String,
    /// Method identifier; the configured default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "jaccard")]
    pub method: Option<String>,
}

/// Response for POST /api/similarity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimilarityResponse {
    pub similarity_score: f64,
    pub method_used: String,
}

/// Body for POST /api/prediction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionRequest {
    #[schema(example = "Write a query listing all users")]
    pub input_text: String,
}

/// Response for POST /api/prediction
///
/// Guardrail violations are a normal result, not an error: a blocked
/// request or response still answers 200 with `passed = false` and the
/// violations that caused it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    pub prediction: String,
    /// False when guardrails blocked the prediction
    pub passed: bool,
    pub cache_hit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// GET /api/health response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Error payload envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ApiError,
}

/// Error details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
