//! # Web API Request Handlers
//!
//! HTTP request handlers organized by functional area.

pub mod fallback;
pub mod health;
pub mod submissions;
