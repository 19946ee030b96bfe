//! # Submission Decoding
//!
//! First of the two request stages: turns a raw request body into a typed
//! [`Submission`]. Failures here are type/shape problems (wrong JSON type,
//! unknown enum value, unparseable date, missing `mode`) and are reported per
//! field. The chain rules in [`crate::validation`] never see a body that fails
//! this stage.
//!
//! Every field is decoded independently so that a body with several bad
//! fields reports all of them, in declaration order.
//!
//! A field the client actually sent (`null` included) is also checked
//! against its field rule, which may look at the fields decoded before it:
//!
//! - `topic` / `category`: must be non-empty when they are the mode's step two
//! - `choose_date` / `choose_time`: must be set when they are on the active path
//! - `budget`: range and step limits
//!
//! These report `value_error` entries. Keys that are absent are left to the
//! chain rules in [`crate::validation`].

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::messages;
use crate::models::{Category, FormPath, LiteralChoices, Mode, Submission, Urgency};
use crate::validation::budget_limit_violations;

/// Location prefix for every error raised while decoding the request body
const BODY_LOC: &str = "body";

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// A single type/shape problem with one field of the body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path to the offending value, starting with `"body"`
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

impl FieldError {
    pub fn new(field: &str, error_type: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![BODY_LOC.to_string(), field.to_string()],
            msg: msg.into(),
            error_type: error_type.to_string(),
        }
    }

    /// A field rule rejected an otherwise well-typed value
    pub fn value_error(field: &str, message: &str) -> Self {
        Self::new(field, "value_error", format!("Value error, {message}"))
    }

    /// Error about the body as a whole rather than one field
    pub fn body(error_type: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![BODY_LOC.to_string()],
            msg: msg.into(),
            error_type: error_type.to_string(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

/// All field errors found in one request body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission could not be decoded ({} field error(s))", .errors.len())]
pub struct DecodeError {
    pub errors: Vec<FieldError>,
}

impl DecodeError {
    fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().filter_map(FieldError::field).collect()
    }
}

/// Decode a raw request body
pub fn decode_submission_bytes(body: &[u8]) -> Result<Submission, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::single(FieldError::body(
            "missing",
            "Field required",
        )));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|_| DecodeError::single(FieldError::body("json_invalid", "JSON decode error")))?;

    decode_submission(&value)
}

/// Decode an already-parsed JSON document
pub fn decode_submission(value: &Value) -> Result<Submission, DecodeError> {
    let Some(object) = value.as_object() else {
        return Err(DecodeError::single(FieldError::body(
            "model_attributes_type",
            "Input should be a valid dictionary or object to extract fields from",
        )));
    };

    let mut errors = Vec::new();

    let mode = match decode_mode(object) {
        Ok(mode) => Some(mode),
        Err(error) => {
            errors.push(error);
            None
        }
    };

    let topic = decode_field(object, "topic", decode_string, &mut errors, |topic| {
        match mode {
            Some(Mode::Basic) if topic.map_or(true, String::is_empty) => {
                vec![messages::TOPIC_REQUIRED]
            }
            _ => Vec::new(),
        }
    });
    let category = decode_field(
        object,
        "category",
        decode_literal::<Category>,
        &mut errors,
        |category| match mode {
            Some(Mode::Advanced) if category.is_none() => vec![messages::CATEGORY_REQUIRED],
            _ => Vec::new(),
        },
    );

    let path = active_path(
        mode,
        topic.as_ref().and_then(|t| t.as_deref()),
        category.flatten(),
    );

    let choose_date = decode_field(object, "choose_date", decode_date, &mut errors, |date| {
        match (date, path) {
            (None, Some(FormPath::Date)) if mode == Some(Mode::Basic) => {
                vec![messages::DATE_REQUIRED_FOR_TOPIC]
            }
            (None, Some(FormPath::Date)) => vec![messages::DATE_REQUIRED_FOR_SCHEDULE],
            _ => Vec::new(),
        }
    });
    let choose_time = decode_field(object, "choose_time", decode_time, &mut errors, |time| {
        match (time, path) {
            (None, Some(FormPath::Time)) if mode == Some(Mode::Basic) => {
                vec![messages::TIME_REQUIRED_FOR_TOPIC]
            }
            (None, Some(FormPath::Time)) => vec![messages::TIME_REQUIRED_FOR_CATEGORY],
            _ => Vec::new(),
        }
    });
    let budget = decode_field(object, "budget", decode_integer, &mut errors, |budget| {
        budget
            .map(|amount| budget_limit_violations(*amount))
            .unwrap_or_default()
    });
    let urgency = decode_field(
        object,
        "urgency",
        decode_literal::<Urgency>,
        &mut errors,
        |_| Vec::new(),
    );

    match mode {
        Some(mode) if errors.is_empty() => Ok(Submission {
            mode,
            topic: topic.flatten(),
            category: category.flatten(),
            choose_date: choose_date.flatten(),
            choose_time: choose_time.flatten(),
            budget: budget.flatten(),
            urgency: urgency.flatten(),
        }),
        _ => Err(DecodeError { errors }),
    }
}

fn decode_mode(object: &Map<String, Value>) -> Result<Mode, FieldError> {
    match object.get("mode") {
        None => Err(FieldError::new("mode", "missing", "Field required")),
        Some(value) => decode_literal::<Mode>("mode", value),
    }
}

/// Decode one optional field and, when the key was sent, apply its rule
///
/// Returns `None` when the field produced an error, otherwise the decoded
/// value (`Some(None)` for an absent key or `null`). Rules see only fields
/// that decoded cleanly before them.
fn decode_field<T>(
    object: &Map<String, Value>,
    field: &str,
    decode: fn(&str, &Value) -> Result<T, FieldError>,
    errors: &mut Vec<FieldError>,
    rule: impl FnOnce(Option<&T>) -> Vec<&'static str>,
) -> Option<Option<T>> {
    let value = match object.get(field) {
        None => return Some(None),
        Some(Value::Null) => None,
        Some(raw) => match decode(field, raw) {
            Ok(value) => Some(value),
            Err(error) => {
                errors.push(error);
                return None;
            }
        },
    };

    let violations = rule(value.as_ref());
    if violations.is_empty() {
        return Some(value);
    }

    errors.extend(
        violations
            .into_iter()
            .map(|message| FieldError::value_error(field, message)),
    );
    None
}

/// Path chosen by the step-two answers decoded so far
fn active_path(mode: Option<Mode>, topic: Option<&str>, category: Option<Category>) -> Option<FormPath> {
    match mode? {
        Mode::Basic => topic.filter(|t| !t.is_empty()).map(FormPath::from_topic),
        Mode::Advanced => category.map(FormPath::from_category),
    }
}

fn decode_literal<T: LiteralChoices>(field: &str, value: &Value) -> Result<T, FieldError> {
    serde_json::from_value::<T>(value.clone()).map_err(|_| {
        FieldError::new(
            field,
            "literal_error",
            format!("Input should be {}", T::expected_description()),
        )
    })
}

fn decode_string(field: &str, value: &Value) -> Result<String, FieldError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| FieldError::new(field, "string_type", "Input should be a valid string"))
}

/// Lax integer coercion: integral floats and numeric strings are accepted
fn decode_integer(field: &str, value: &Value) -> Result<i64, FieldError> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            match number.as_f64() {
                Some(float) if float.fract() != 0.0 => Err(FieldError::new(
                    field,
                    "int_from_float",
                    "Input should be a valid integer, got a number with a fractional part",
                )),
                Some(float) if float.is_finite() && float.abs() <= i64::MAX as f64 => {
                    Ok(float as i64)
                }
                _ => Err(FieldError::new(
                    field,
                    "int_parsing_size",
                    "Unable to parse input string as an integer, exceeded maximum size",
                )),
            }
        }
        Value::String(text) => text.trim().parse::<i64>().map_err(|_| {
            FieldError::new(
                field,
                "int_parsing",
                "Input should be a valid integer, unable to parse string as an integer",
            )
        }),
        _ => Err(FieldError::new(
            field,
            "int_type",
            "Input should be a valid integer",
        )),
    }
}

fn decode_date(field: &str, value: &Value) -> Result<NaiveDate, FieldError> {
    let text = value
        .as_str()
        .ok_or_else(|| FieldError::new(field, "date_type", "Input should be a valid date"))?;

    parse_calendar_date(text).ok_or_else(|| {
        FieldError::new(
            field,
            "date_parsing",
            "Input should be a valid date in the format YYYY-MM-DD",
        )
    })
}

fn decode_time(field: &str, value: &Value) -> Result<NaiveTime, FieldError> {
    let text = value
        .as_str()
        .ok_or_else(|| FieldError::new(field, "time_type", "Input should be a valid time"))?;

    parse_time_of_day(text).ok_or_else(|| {
        FieldError::new(
            field,
            "time_parsing",
            "Input should be in a valid time format, expected HH:MM[:SS[.ffffff]]",
        )
    })
}

/// Strict ISO calendar date, `YYYY-MM-DD`
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// 24-hour `HH:MM`, optionally with seconds and a fractional part
///
/// Hours, minutes and seconds must be two digits each; leap seconds are rejected.
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    if !has_time_shape(text.as_bytes()) {
        return None;
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .filter(|time| time.nanosecond() < 1_000_000_000)
}

/// `HH:MM`, `HH:MM:SS` or `HH:MM:SS.f+`, digits only
fn has_time_shape(bytes: &[u8]) -> bool {
    let digits = |range: std::ops::Range<usize>| {
        bytes
            .get(range)
            .is_some_and(|part| !part.is_empty() && part.iter().all(u8::is_ascii_digit))
    };

    let hours_minutes = digits(0..2) && bytes.get(2) == Some(&b':') && digits(3..5);
    match bytes.len() {
        5 => hours_minutes,
        8 => hours_minutes && bytes[5] == b':' && digits(6..8),
        len if len > 9 => {
            hours_minutes
                && bytes[5] == b':'
                && digits(6..8)
                && bytes[8] == b'.'
                && digits(9..len)
        }
        _ => false,
    }
}
