//! # Submission Model
//!
//! The four-step chained form: mode, then topic or category, then a date or a
//! time, then a budget or an urgency. Which fields matter at steps two to four
//! depends on the answers given before them; [`FormPath`] captures that
//! dependency for steps three and four.

use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::DATE_TOPIC_MARKER;

/// Enum-typed form field whose wire values are its variant names
pub trait LiteralChoices: DeserializeOwned {
    /// Accepted wire values, in the order they are presented to clients
    const VARIANTS: &'static [&'static str];

    /// Renders the accepted values as `'A', 'B' or 'C'`
    fn expected_description() -> String {
        let quoted: Vec<String> = Self::VARIANTS.iter().map(|v| format!("'{v}'")).collect();
        match quoted.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}

/// Step one: which branch of the form the user is filling in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Basic,
    Advanced,
}

impl LiteralChoices for Mode {
    const VARIANTS: &'static [&'static str] = &["Basic", "Advanced"];
}

/// Step two for Advanced mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Schedule,
    Realtime,
    Analytics,
}

impl LiteralChoices for Category {
    const VARIANTS: &'static [&'static str] = &["Schedule", "Realtime", "Analytics"];
}

/// Step four on the time path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Normal,
    High,
}

impl LiteralChoices for Urgency {
    const VARIANTS: &'static [&'static str] = &["Low", "Normal", "High"];
}

/// Branch of the decision tree chosen by mode plus topic or category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPath {
    /// Scheduling: requires `choose_date` and `budget`
    Date,
    /// Real-time: requires `choose_time` and `urgency`
    Time,
}

impl FormPath {
    /// Basic mode: the topic text decides, case-insensitively
    pub fn from_topic(topic: &str) -> Self {
        if topic.to_lowercase().contains(DATE_TOPIC_MARKER) {
            FormPath::Date
        } else {
            FormPath::Time
        }
    }

    /// Advanced mode: only `Schedule` is a date-path category
    pub fn from_category(category: Category) -> Self {
        match category {
            Category::Schedule => FormPath::Date,
            Category::Realtime | Category::Analytics => FormPath::Time,
        }
    }
}

/// A decoded form submission
///
/// Every field past `mode` is optional at the type level; which of them are
/// required is decided by the validator from the answers given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub mode: Mode,
    pub topic: Option<String>,
    pub category: Option<Category>,
    pub choose_date: Option<NaiveDate>,
    pub choose_time: Option<NaiveTime>,
    pub budget: Option<i64>,
    pub urgency: Option<Urgency>,
}

impl Submission {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            topic: None,
            category: None,
            choose_date: None,
            choose_time: None,
            budget: None,
            urgency: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.choose_date = Some(date);
        self
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.choose_time = Some(time);
        self
    }

    pub fn with_budget(mut self, budget: i64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// The topic, treating an empty string the same as no topic
    pub fn topic_text(&self) -> Option<&str> {
        self.topic.as_deref().filter(|t| !t.is_empty())
    }

    /// The active branch, or `None` while the step-two answer for the chosen mode is missing
    ///
    /// Only the step-two field belonging to `mode` is consulted; a stray
    /// `category` on a Basic submission (or `topic` on an Advanced one) is ignored.
    pub fn path(&self) -> Option<FormPath> {
        match self.mode {
            Mode::Basic => self.topic_text().map(FormPath::from_topic),
            Mode::Advanced => self.category.map(FormPath::from_category),
        }
    }
}
