//! # Form Models
//!
//! Typed representation of a chained form submission and the concepts derived from it.

pub mod submission;

pub use submission::{Category, FormPath, LiteralChoices, Mode, Submission, Urgency};
