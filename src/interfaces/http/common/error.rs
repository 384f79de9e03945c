//! Mapping of domain errors onto HTTP responses
//!
//! Every non-2xx body has the same shape:
//! `{"error": "<machine code>", "detail": "<human message>"}`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub const VALIDATION_ERROR: &str = "validation_error";
pub const NOT_FOUND: &str = "not_found";
pub const CONFLICT: &str = "conflict";
pub const UNAUTHORIZED: &str = "unauthorized";
pub const CONFIGURATION_ERROR: &str = "configuration_error";
pub const INTERNAL_ERROR: &str = "internal_error";

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable description
    pub detail: String,
}

impl ErrorBody {
    pub fn new(error: &str, detail: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            detail: detail.into(),
        }
    }
}

/// Build an error response with the standard body
pub fn error_response(status: StatusCode, code: &str, detail: impl Into<String>) -> Response {
    let mut response = (status, Json(ErrorBody::new(code, detail))).into_response();
    if status == StatusCode::UNAUTHORIZED {
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static("Basic realm=\"admin\""),
        );
    }
    response
}

/// Handler error: a [`DomainError`] on its way out as HTTP
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) | DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Configuration(_) | DomainError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match &self.0 {
            DomainError::Validation(_) => VALIDATION_ERROR,
            DomainError::Conflict(_) => CONFLICT,
            DomainError::NotFound { .. } => NOT_FOUND,
            DomainError::Unauthorized(_) => UNAUTHORIZED,
            DomainError::Configuration(_) => CONFIGURATION_ERROR,
            DomainError::Storage(_) => INTERNAL_ERROR,
        }
    }

    fn detail(&self) -> String {
        match &self.0 {
            DomainError::Validation(msg)
            | DomainError::Conflict(msg)
            | DomainError::Unauthorized(msg) => msg.clone(),
            DomainError::NotFound { entity, value, .. } => {
                format!("{} {} not found", entity, value)
            }
            DomainError::Configuration(_) => "Server configuration error".to_string(),
            DomainError::Storage(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.0.is_client_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        error_response(self.status(), self.code(), self.detail())
    }
}
