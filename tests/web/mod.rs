//! # Web API Integration Tests
//!
//! Integration tests for the form API over real HTTP:
//! - Submission acceptance and both 422 error shapes
//! - Health, fallback and request-id behavior
//! - CORS preflight handling

pub mod public_endpoint_tests;
pub mod submission_tests;

/// Re-export common test utilities
pub use test_infrastructure::*;
