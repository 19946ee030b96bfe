//! # Web API Middleware
//!
//! Middleware stack for the form API: request ID generation, CORS for the
//! browser frontend, request tracing, a request timeout and conversion of
//! handler panics into the generic 500 response.

pub mod request_id;

use axum::extract::Request;
use axum::http::{HeaderName, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::{CorsConfig, WebConfig};
use crate::logging;
use crate::web::response_types::ApiError;
use crate::web::state::FormWebState;

use request_id::{RequestId, REQUEST_ID_HEADER};

/// Apply the production middleware stack
///
/// Outermost first:
/// 1. Request ID generation
/// 2. CORS handling (so error responses carry CORS headers too)
/// 3. Request tracing
/// 4. Request timeout
/// 5. Panic → 500 conversion
pub fn apply_middleware_stack(
    router: Router<Arc<FormWebState>>,
    config: &WebConfig,
) -> Router<Arc<FormWebState>> {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(create_cors_layer(&config.cors))
        .layer(middleware::from_fn(request_id::add_request_id))
}

/// Create CORS layer from configuration
///
/// Methods and headers are mirrored from the preflight request, which is
/// how "allow all" is expressed when credentials are allowed.
fn create_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins = if cors.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(cors.origin_header_values())
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cors.allow_credentials)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

fn make_request_span(request: &Request) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    logging::log_error("web", "handle_request", &detail, Some("handler panicked"));

    ApiError::Internal.into_response()
}
