#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # Chained Form
//!
//! HTTP service that validates multi-step ("chained") form submissions.
//!
//! ## Overview
//!
//! A client submits one JSON payload answering four dependent questions:
//!
//! 1. **mode**: `Basic` or `Advanced`
//! 2. **topic** (Basic, free text) or **category** (Advanced: `Schedule`, `Realtime`, `Analytics`)
//! 3. **choose_date** or **choose_time**, depending on step two
//! 4. **budget** or **urgency**, depending on the same branch
//!
//! The service checks that the answers are consistent with that decision
//! tree and, on success, issues a random submission id.
//!
//! ## Request stages
//!
//! Every submission passes two ordered stages with distinct error shapes:
//!
//! - [`decode`]: JSON body → typed [`models::Submission`]; per-field
//!   `{loc, msg, type}` errors
//! - [`validation`]: chain rules on the typed submission; a joined list of
//!   rule messages
//!
//! ## Module Organization
//!
//! - [`models`] - Submission shape and the derived date/time path
//! - [`decode`] - Body decoding and type/shape errors
//! - [`validation`] - The chain validator
//! - [`web`] - axum router, handlers and middleware
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured logging setup and helpers
//! - [`error`] - Crate-level errors
//!
//! ## Quick Start
//!
//! ```rust
//! use chained_form::models::{Category, Mode, Submission};
//! use chained_form::validation::FormValidator;
//! use chrono::NaiveDate;
//!
//! let submission = Submission::new(Mode::Advanced)
//!     .with_category(Category::Schedule)
//!     .with_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
//!     .with_budget(2500);
//!
//! let result = FormValidator::new().validate(&submission);
//! assert!(result.is_accepted());
//! ```

pub mod config;
pub mod constants;
pub mod decode;
pub mod error;
pub mod logging;
pub mod models;
pub mod validation;
pub mod web;

pub use config::{ConfigManager, ConfigurationError, FormServiceConfig};
pub use decode::{decode_submission, decode_submission_bytes, DecodeError, FieldError};
pub use error::{FormError, Result};
pub use models::{Category, FormPath, Mode, Submission, Urgency};
pub use validation::{AcceptedSubmission, FormValidator, SubmissionId, ValidationResult};
