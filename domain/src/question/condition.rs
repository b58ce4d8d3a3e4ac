//! Condition parsing and evaluation.
//!
//! Two textual condition dialects appear in the question data and both are
//! supported. They are normalized into a single structured form at bank
//! build time; evaluation afterwards is a plain set-membership check.
//!
//! # Dialects
//!
//! | Dialect | Example | Meaning |
//! |---------|---------|---------|
//! | Explicit | `4=ja,misschien` | eligible iff the previous answer is one of the listed values |
//! | Suffix | `12a` | eligible iff the previous answer equals the *first* option of question `12` |
//!
//! The explicit dialect carries its own answer set, so its referenced index
//! is never re-resolved against the bank (the first lead-in question
//! references an answer collected by the static front-end, outside the bank
//! entirely). The suffix dialect has no answer set of its own and must be
//! resolved against the assembled bank; an unresolvable parent degrades to
//! a never-satisfiable condition rather than an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A normalized prerequisite: `(referenced_index, satisfying answers)`.
///
/// An empty answer set is never satisfied. Builders use this to degrade
/// malformed or unresolvable conditions without aborting startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    referenced_index: String,
    answers: BTreeSet<String>,
}

impl Condition {
    pub fn new(referenced_index: impl Into<String>, answers: BTreeSet<String>) -> Self {
        Self {
            referenced_index: referenced_index.into(),
            answers,
        }
    }

    /// A condition that no answer can satisfy.
    pub fn never(referenced_index: impl Into<String>) -> Self {
        Self {
            referenced_index: referenced_index.into(),
            answers: BTreeSet::new(),
        }
    }

    /// Index of the question (or out-of-bank source) this condition refers to.
    pub fn referenced_index(&self) -> &str {
        &self.referenced_index
    }

    /// The set of answers that satisfy this condition.
    pub fn answers(&self) -> &BTreeSet<String> {
        &self.answers
    }

    /// Evaluate against the single most recent answer.
    ///
    /// An absent previous answer satisfies nothing.
    pub fn is_met(&self, previous_answer: Option<&str>) -> bool {
        match previous_answer {
            Some(answer) => self.answers.contains(answer),
            None => false,
        }
    }
}

/// A parsed but not yet normalized condition string.
///
/// [`ConditionSpec::parse`] classifies the raw text into one of the two
/// dialects; the bank builder then resolves it into a [`Condition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionSpec {
    /// `"<index>=<answer1>,<answer2>"` — explicit answer set.
    Explicit {
        referenced_index: String,
        answers: Vec<String>,
    },
    /// `"<parent-digits><letter>"` — eligible iff the previous answer is
    /// the first option of the parent question.
    FirstOption { parent_index: String },
}

impl ConditionSpec {
    /// Parse a raw condition string under either dialect.
    ///
    /// Returns `None` when the text fits neither dialect; the caller
    /// degrades such conditions to "never eligible" instead of failing.
    pub fn parse(raw: &str) -> Option<ConditionSpec> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some((index, answers)) = raw.split_once('=') {
            let index = index.trim();
            let answers: Vec<String> = answers
                .split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
            if index.is_empty() || answers.is_empty() {
                return None;
            }
            return Some(ConditionSpec::Explicit {
                referenced_index: index.to_string(),
                answers,
            });
        }

        // Suffix dialect: one or more digits followed by a single letter,
        // e.g. "12a" refers to question "12".
        let mut chars = raw.chars();
        let last = chars.next_back()?;
        let parent: &str = chars.as_str();
        if last.is_ascii_alphabetic()
            && !parent.is_empty()
            && parent.chars().all(|c| c.is_ascii_digit())
        {
            return Some(ConditionSpec::FirstOption {
                parent_index: parent.to_string(),
            });
        }

        None
    }
}
