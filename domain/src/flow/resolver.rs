//! The flow resolver.
//!
//! A linear forward scan with early termination on the first eligible
//! record. This is a pure function of its inputs, with no side effects and
//! no hidden state, so identical calls yield identical results and requests
//! can be served concurrently against the shared read-only bank.

use crate::core::error::FlowError;
use crate::question::bank::QuestionBank;
use crate::question::record::QuestionRecord;

/// Find the next eligible question at or after `start_position` (1-based).
///
/// Records without a condition are returned immediately. Conditioned
/// records are checked against the single most recent answer; unmet
/// conditions advance the scan one position. Only one previous answer is
/// considered per call, so conditions chained more than one hop deep are
/// evaluated shallowly against the immediately preceding answer.
///
/// # Errors
///
/// - [`FlowError::InvalidPosition`] when `start_position` is zero.
/// - [`FlowError::Exhausted`] when the scan runs past the end of the bank.
pub fn resolve<'a>(
    bank: &'a QuestionBank,
    start_position: usize,
    previous_answer: Option<&str>,
) -> Result<&'a QuestionRecord, FlowError> {
    if start_position < 1 {
        return Err(FlowError::InvalidPosition(start_position));
    }

    let mut position = start_position;
    while let Some(record) = bank.get(position) {
        if record.is_eligible(previous_answer) {
            return Ok(record);
        }
        position += 1;
    }

    Err(FlowError::Exhausted(start_position))
}
