//! # Web API Response Types
//!
//! Success payloads and the error type returned by handlers, with their HTTP
//! mappings. Every error body has a single `detail` key: a list of field
//! errors for decode failures, a joined string otherwise.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::constants::{messages, system};
use crate::decode::DecodeError;
use crate::validation::SubmissionId;

/// Body of a successful `POST /api/submit`
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub status: String,
    pub id: SubmissionId,
}

impl SubmitResponse {
    pub fn ok(id: SubmissionId) -> Self {
        Self {
            status: "ok".to_string(),
            id,
        }
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Web API errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body failed type/shape decoding; the chain rules were not run
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Body decoded but broke one or more chain rules
    #[error("{}", .errors.join(messages::JOIN_SEPARATOR))]
    Validation { errors: Vec<String> },

    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            ApiError::Decode(err) => json!({ "detail": err.errors }),
            ApiError::Validation { .. } => json!({ "detail": self.to_string() }),
            ApiError::NotFound => json!({ "detail": system::NOT_FOUND_DETAIL }),
            ApiError::MethodNotAllowed => json!({ "detail": "Method Not Allowed" }),
            ApiError::Internal => json!({ "detail": system::INTERNAL_ERROR_DETAIL }),
        };

        (status_code, Json(body)).into_response()
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;
