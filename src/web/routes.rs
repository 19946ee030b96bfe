//! # Web API Routes
//!
//! Route definitions organized by functionality.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::web::{handlers, state::FormWebState};

/// Health check route
pub fn health_routes() -> Router<Arc<FormWebState>> {
    Router::new().route("/", get(handlers::health::root))
}

/// Form submission routes
pub fn submission_routes() -> Router<Arc<FormWebState>> {
    Router::new().route("/api/submit", post(handlers::submissions::submit_form))
}
