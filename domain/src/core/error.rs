//! Domain error types

use thiserror::Error;

/// Errors produced by the flow resolver.
///
/// Both variants are request-level failures: they are reported to the
/// caller and never abort the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The caller asked for a position below the first question.
    #[error("invalid question position: {0}")]
    InvalidPosition(usize),

    /// The scan ran past the end of the bank without finding an
    /// eligible question.
    #[error("no eligible question at or after position {0}")]
    Exhausted(usize),
}

impl FlowError {
    /// Check whether this error means the questionnaire has no more
    /// questions to offer (as opposed to bad caller input).
    pub fn is_exhausted(&self) -> bool {
        matches!(self, FlowError::Exhausted(_))
    }
}
