//! Chain validation for decoded form submissions
//!
//! Second of the two request stages. Applies the decision-tree rules that
//! tie later answers to earlier ones, plus the per-field business limits,
//! and collects every violation instead of stopping at the first.
//!
//! Rule order (and therefore message order):
//! 1. mode branch: Basic needs a topic, Advanced needs a category
//! 2. path field: a date or a time, depending on the topic/category
//! 3. terminal field: a budget on the date path, otherwise an urgency
//! 4. field limits: budget range and step
//!
//! Over HTTP the budget limits are already enforced while decoding (see
//! [`crate::decode`]), so only rules 1 to 3 reach the joined `detail`
//! string. Rule 4 still applies to submissions built in code.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::constants::{budget, messages, DATE_TOPIC_MARKER};
use crate::logging;
use crate::models::{Category, FormPath, Mode, Submission};

/// Opaque identifier issued for every accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Fresh random (v4) identifier; independent per call
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Normalized record of an accepted submission, as written to the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedSubmission {
    pub id: SubmissionId,
    pub received_at: DateTime<Utc>,
    pub form_data: Submission,
}

/// Outcome of validating one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted(AcceptedSubmission),
    Rejected { errors: Vec<String> },
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }

    pub fn id(&self) -> Option<SubmissionId> {
        match self {
            ValidationResult::Accepted(accepted) => Some(accepted.id),
            ValidationResult::Rejected { .. } => None,
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            ValidationResult::Accepted(_) => &[],
            ValidationResult::Rejected { errors } => errors,
        }
    }
}

/// Stateless validator for chained form submissions
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValidator;

impl FormValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a submission, issuing an id and logging the record on success
    pub fn validate(&self, submission: &Submission) -> ValidationResult {
        let errors = self.check(submission);

        if !errors.is_empty() {
            logging::log_submission_rejected(submission.mode, &errors);
            return ValidationResult::Rejected { errors };
        }

        let accepted = AcceptedSubmission {
            id: SubmissionId::generate(),
            received_at: Utc::now(),
            form_data: submission.clone(),
        };
        logging::log_submission_accepted(&accepted);

        ValidationResult::Accepted(accepted)
    }

    /// Every rule violation for `submission`, in rule order; empty when valid
    pub fn check(&self, submission: &Submission) -> Vec<String> {
        let mut errors = Vec::new();

        check_mode_branch(submission, &mut errors);
        check_path_field(submission, &mut errors);
        check_terminal_field(submission, &mut errors);
        if let Some(amount) = submission.budget {
            errors.extend(budget_limit_violations(amount).into_iter().map(str::to_string));
        }

        errors
    }
}

fn check_mode_branch(submission: &Submission, errors: &mut Vec<String>) {
    match submission.mode {
        Mode::Basic if submission.topic_text().is_none() => {
            errors.push(messages::TOPIC_REQUIRED.to_string());
        }
        Mode::Advanced if submission.category.is_none() => {
            errors.push(messages::CATEGORY_REQUIRED.to_string());
        }
        _ => {}
    }
}

/// Skipped entirely while the mode's step-two field is missing
fn check_path_field(submission: &Submission, errors: &mut Vec<String>) {
    match (submission.mode, submission.topic_text(), submission.category) {
        (Mode::Basic, Some(topic), _) => match FormPath::from_topic(topic) {
            FormPath::Date if submission.choose_date.is_none() => {
                errors.push(messages::DATE_REQUIRED_FOR_TOPIC.to_string());
            }
            FormPath::Time if submission.choose_time.is_none() => {
                errors.push(messages::TIME_REQUIRED_FOR_TOPIC.to_string());
            }
            _ => {}
        },
        (Mode::Advanced, _, Some(category)) => match FormPath::from_category(category) {
            FormPath::Date if submission.choose_date.is_none() => {
                errors.push(messages::DATE_REQUIRED_FOR_SCHEDULE.to_string());
            }
            FormPath::Time if submission.choose_time.is_none() => {
                errors.push(messages::TIME_REQUIRED_FOR_CATEGORY.to_string());
            }
            _ => {}
        },
        _ => {}
    }
}

/// Budget on the date path, otherwise urgency; never both
fn check_terminal_field(submission: &Submission, errors: &mut Vec<String>) {
    if is_date_path(submission) {
        if submission.budget.is_none() {
            errors.push(messages::BUDGET_REQUIRED.to_string());
        }
    } else if submission.urgency.is_none() {
        errors.push(messages::URGENCY_REQUIRED.to_string());
    }
}

/// Derived on its own rather than from [`Submission::path`]: an incomplete
/// step two counts as the time path here, so a Basic submission with no
/// topic is still asked for an urgency.
fn is_date_path(submission: &Submission) -> bool {
    match submission.mode {
        Mode::Basic => submission
            .topic
            .as_deref()
            .is_some_and(|topic| !topic.is_empty() && topic.to_lowercase().contains(DATE_TOPIC_MARKER)),
        Mode::Advanced => submission.category == Some(Category::Schedule),
    }
}

/// Range and step are independent rules; both are reported when both fail
pub(crate) fn budget_limit_violations(amount: i64) -> Vec<&'static str> {
    let mut violations = Vec::new();
    if !(budget::MIN..=budget::MAX).contains(&amount) {
        violations.push(messages::BUDGET_OUT_OF_RANGE);
    }
    if amount % budget::STEP != 0 {
        violations.push(messages::BUDGET_NOT_MULTIPLE);
    }
    violations
}
