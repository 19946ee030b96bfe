//! # Form Submission Handler
//!
//! `POST /api/submit` runs the two request stages in order: decode the body
//! into a typed submission, then apply the chain rules. A decode failure
//! short-circuits; the validator only ever sees well-typed input.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::debug;

use crate::decode::decode_submission_bytes;
use crate::validation::ValidationResult;
use crate::web::response_types::{ApiError, ApiResult, SubmitResponse};
use crate::web::state::FormWebState;

/// Submit a chained form: POST /api/submit
pub async fn submit_form(
    State(state): State<Arc<FormWebState>>,
    body: Bytes,
) -> ApiResult<Json<SubmitResponse>> {
    let submission = decode_submission_bytes(&body).inspect_err(|err| {
        debug!(fields = ?err.fields(), "Submission failed decoding");
    })?;

    match state.validator.validate(&submission) {
        ValidationResult::Accepted(accepted) => Ok(Json(SubmitResponse::ok(accepted.id))),
        ValidationResult::Rejected { errors } => Err(ApiError::validation(errors)),
    }
}
