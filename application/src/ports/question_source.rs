//! Question source port
//!
//! Defines the interface for loading raw question rows from an external
//! tabular source. The engine does not care about the storage format, only
//! the row shape; the shipped adapter reads an xlsx workbook.

use intake_domain::RawQuestionRow;
use thiserror::Error;

/// Errors that can occur while loading question rows.
///
/// Any of these is fatal at startup: the service never runs with a
/// partial bank.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Question source unavailable: {0}")]
    Unavailable(String),

    #[error("Question source unreadable: {0}")]
    Unreadable(String),
}

/// Supplier of ordered raw question rows.
///
/// Loading is a local, synchronous read performed once at startup.
/// Implementations must preserve source order; the builder decides which
/// rows survive.
pub trait QuestionSource: Send + Sync {
    fn load(&self) -> Result<Vec<RawQuestionRow>, SourceError>;
}
