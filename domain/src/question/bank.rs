//! The question bank and its builder.
//!
//! The bank is built once at process start and never mutated afterwards.
//! [`BankBuilder`] takes raw rows in their final order (lead-ins first,
//! then sheet rows), drops rows with blank text, and normalizes the raw
//! condition strings into structured [`Condition`]s. Anything that cannot
//! be normalized is degraded, never fatal, and reported as a
//! [`BankWarning`] for the caller to log.

use crate::question::condition::{Condition, ConditionSpec};
use crate::question::record::{QuestionRecord, RawQuestionRow};
use std::collections::BTreeSet;

/// The full ordered sequence of question records served by the flow engine.
///
/// Positions are 1-based, matching the caller-facing `question_index`
/// contract. The `index` field of a record is an identifier, not a
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// Number of questions in the bank.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the record at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&QuestionRecord> {
        if position == 0 {
            return None;
        }
        self.records.get(position - 1)
    }

    /// Iterate the records in bank order.
    pub fn records(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.records.iter()
    }
}

/// A degraded input detected while building the bank.
///
/// Warnings are values rather than log calls so the domain stays free of
/// I/O; the build-bank use case logs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankWarning {
    /// A condition string fit neither dialect; the question was kept with
    /// a never-satisfiable condition.
    MalformedCondition { index: String, raw: String },
    /// A suffix-dialect condition referenced a parent that is absent from
    /// the bank or has no options; the question was kept with a
    /// never-satisfiable condition.
    UnresolvedParent { index: String, parent: String },
}

impl std::fmt::Display for BankWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BankWarning::MalformedCondition { index, raw } => {
                write!(f, "question {index}: unparsable condition '{raw}'")
            }
            BankWarning::UnresolvedParent { index, parent } => {
                write!(f, "question {index}: condition parent '{parent}' not resolvable")
            }
        }
    }
}

/// Builds a [`QuestionBank`] from raw rows.
#[derive(Debug, Default)]
pub struct BankBuilder {
    rows: Vec<RawQuestionRow>,
}

impl BankBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows in bank order. Lead-in rows go in before sheet rows;
    /// the builder never re-sorts.
    pub fn extend(mut self, rows: impl IntoIterator<Item = RawQuestionRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Build the bank.
    ///
    /// Rows with blank text are dropped silently; sparse sheet rows must
    /// not abort startup. Condition strings are normalized in a second
    /// pass so suffix-dialect parents can be resolved against the full
    /// merged bank, wherever they appear.
    pub fn build(self) -> (QuestionBank, Vec<BankWarning>) {
        let mut warnings = Vec::new();

        let kept: Vec<RawQuestionRow> = self
            .rows
            .into_iter()
            .filter(|row| !row.text.trim().is_empty())
            .collect();

        let records = kept
            .iter()
            .map(|row| {
                let condition = row
                    .condition
                    .as_deref()
                    .filter(|raw| !raw.trim().is_empty())
                    .map(|raw| normalize_condition(&row.index, raw, &kept, &mut warnings));
                QuestionRecord::new(
                    row.index.clone(),
                    row.text.clone(),
                    row.options.clone(),
                    condition,
                )
            })
            .collect();

        (QuestionBank { records }, warnings)
    }
}

/// Normalize one raw condition string against the kept rows.
fn normalize_condition(
    index: &str,
    raw: &str,
    rows: &[RawQuestionRow],
    warnings: &mut Vec<BankWarning>,
) -> Condition {
    match ConditionSpec::parse(raw) {
        Some(ConditionSpec::Explicit {
            referenced_index,
            answers,
        }) => Condition::new(referenced_index, answers.into_iter().collect()),
        Some(ConditionSpec::FirstOption { parent_index }) => {
            // Value-match on the index field; the bank guarantees zero or
            // one matching record.
            let first_option = rows
                .iter()
                .find(|row| row.index == parent_index)
                .and_then(|parent| parent.options.first())
                .filter(|option| !option.trim().is_empty());
            match first_option {
                Some(option) => {
                    Condition::new(parent_index, BTreeSet::from([option.clone()]))
                }
                None => {
                    warnings.push(BankWarning::UnresolvedParent {
                        index: index.to_string(),
                        parent: parent_index.clone(),
                    });
                    Condition::never(parent_index)
                }
            }
        }
        None => {
            warnings.push(BankWarning::MalformedCondition {
                index: index.to_string(),
                raw: raw.to_string(),
            });
            Condition::never(raw)
        }
    }
}
