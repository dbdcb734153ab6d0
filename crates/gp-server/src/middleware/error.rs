//! API error mapping
//!
//! Converts core `AppError`s and handler-level failures into consistent
//! JSON error bodies with the right status codes. Guardrail violations
//! never pass through here; they are data, not errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use gp_types::AppError;

use crate::types::{ApiError, ErrorResponse};

/// An error response carrying a status code and a JSON body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

pub type ApiResult<T> = Result<T, ApiErrorResponse>;

impl ApiErrorResponse {
    pub fn new(status: StatusCode, error_type: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiError {
                message: message.into(),
                error_type: error_type.to_string(),
                param: None,
                code: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request_error", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found_error", message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "generation_error", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    /// Attach the offending request parameter name.
    pub fn with_param(mut self, param: &str) -> Self {
        self.error.param = Some(param.to_string());
        self
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse { error: self.error }),
        )
            .into_response()
    }
}

impl From<AppError> for ApiErrorResponse {
    fn from(err: AppError) -> Self {
        match &err {
            AppError::NotFound(_) => Self::not_found(err.to_string()),
            AppError::InvalidMethod(_) => Self::bad_request(err.to_string()),
            AppError::Generation(_) => Self::bad_gateway(err.to_string()),
            _ => Self::internal_error(err.to_string()),
        }
    }
}
