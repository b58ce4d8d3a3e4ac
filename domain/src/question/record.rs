//! Question record value objects

use crate::question::condition::Condition;
use serde::{Deserialize, Serialize};

/// One entry in the question bank (Value Object)
///
/// The `index` is a stable identifier string: sheet-sourced questions may
/// use alphanumeric sub-indices (e.g. `"7a"`) while lead-in questions use
/// small integers as strings. Indices are not guaranteed to be numerically
/// contiguous; traversal order is the record's position in the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    index: String,
    text: String,
    options: Vec<String>,
    condition: Option<Condition>,
}

impl QuestionRecord {
    /// Create a new record. The text must be non-empty; blank rows are
    /// filtered out before records are constructed.
    pub fn new(
        index: impl Into<String>,
        text: impl Into<String>,
        options: Vec<String>,
        condition: Option<Condition>,
    ) -> Self {
        let text = text.into();
        assert!(!text.trim().is_empty(), "Question text cannot be empty");
        Self {
            index: index.into(),
            text,
            options,
            condition,
        }
    }

    /// Stable identifier of this question.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The question prompt.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Quick-reply options; empty for free-text questions.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Prerequisite condition, if any.
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Whether this question may be shown given the previous answer.
    ///
    /// A record without a condition is always eligible.
    pub fn is_eligible(&self, previous_answer: Option<&str>) -> bool {
        match &self.condition {
            None => true,
            Some(condition) => condition.is_met(previous_answer),
        }
    }
}

impl std::fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.index, self.text)
    }
}

/// A raw question row as supplied by a question source, before any
/// filtering or condition normalization.
///
/// This is the shape the bank builder consumes: the lead-in set is
/// hand-authored in this form and sheet adapters produce it from their
/// storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestionRow {
    /// Question identifier, e.g. `"2"` or `"7a"`.
    pub index: String,
    /// Question prompt; rows with blank text are skipped by the builder.
    pub text: String,
    /// Quick-reply options, already split from their source encoding.
    pub options: Vec<String>,
    /// Raw condition string in either supported dialect, if any.
    pub condition: Option<String>,
}

impl RawQuestionRow {
    pub fn new(
        index: impl Into<String>,
        text: impl Into<String>,
        options: Vec<String>,
        condition: Option<String>,
    ) -> Self {
        Self {
            index: index.into(),
            text: text.into(),
            options,
            condition,
        }
    }
}
