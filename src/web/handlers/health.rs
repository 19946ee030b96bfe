//! # Health Check Handler
//!
//! Liveness endpoint used by the frontend and load balancers.

use axum::Json;

use crate::constants::system;
use crate::web::response_types::HealthResponse;

/// Basic health check endpoint: GET /
///
/// Always returns the same message while the process is serving requests.
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: system::HEALTH_MESSAGE.to_string(),
    })
}
