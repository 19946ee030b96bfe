//! # Request ID Middleware
//!
//! Generates unique request IDs for tracing and debugging.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Add request ID middleware
///
/// Generates a unique request ID for each HTTP request and adds it to:
/// - Request extensions, where the trace layer picks it up for its span
/// - Response headers as `x-request-id`
pub async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Request ID wrapper for extension storage
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    /// Get the request ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
