//! # Form Web API
//!
//! HTTP boundary of the service. The router is built from an explicit,
//! immutable [`FormWebState`]; nothing here keeps global state.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | fixed health message |
//! | `POST /api/submit` | decode, validate, issue a submission id |

use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::{FormError, Result};

pub mod handlers;
pub mod middleware;
pub mod response_types;
pub mod routes;
pub mod state;

pub use response_types::{ApiError, ApiResult, HealthResponse, SubmitResponse};
pub use state::FormWebState;

/// Create the web application with all routes and middleware
pub fn create_app(state: Arc<FormWebState>) -> Router {
    let router = Router::new()
        .merge(routes::health_routes())
        .merge(routes::submission_routes())
        .fallback(handlers::fallback::not_found)
        .method_not_allowed_fallback(handlers::fallback::method_not_allowed);

    let app = middleware::apply_middleware_stack(router, &state.config).with_state(state);

    info!("Form web application created with all routes and middleware");
    app
}

/// Bind the configured address
pub async fn bind(bind_address: &str) -> Result<TcpListener> {
    TcpListener::bind(bind_address)
        .await
        .map_err(|e| FormError::bind(bind_address, e))
}

/// Serve the application on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: Arc<FormWebState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr().map_err(FormError::Server)?;
    let app = create_app(state);

    info!(address = %local_addr, "Form web server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(FormError::Server)
}
