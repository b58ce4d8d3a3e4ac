//! Port for structured flow-event logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures each flow request
//! as a machine-readable record (one JSONL line in the shipped adapter).

use serde::Serialize;

/// One resolved (or failed) flow request.
#[derive(Debug, Clone, Serialize)]
pub struct FlowEvent {
    /// Outcome kind: `"question_served"`, `"flow_exhausted"`,
    /// `"invalid_position"`, or `"rephrase_failed"`.
    pub kind: &'static str,
    /// The 1-based position the caller asked for.
    pub start_position: usize,
    /// The answer the caller supplied, if any.
    pub previous_answer: Option<String>,
    /// Index of the question that was served, when one was.
    pub served_index: Option<String>,
}

impl FlowEvent {
    pub fn new(kind: &'static str, start_position: usize) -> Self {
        Self {
            kind,
            start_position,
            previous_answer: None,
            served_index: None,
        }
    }

    pub fn with_previous_answer(mut self, answer: Option<&str>) -> Self {
        self.previous_answer = answer.map(str::to_string);
        self
    }

    pub fn with_served_index(mut self, index: &str) -> Self {
        self.served_index = Some(index.to_string());
        self
    }
}

/// Port for recording flow events.
///
/// `log` is intentionally synchronous and non-fallible so a broken sink
/// cannot disrupt request handling; failures are silently ignored by
/// implementations.
pub trait FlowLogger: Send + Sync {
    fn log(&self, event: FlowEvent);
}

/// No-op implementation for tests and when flow logging is disabled.
pub struct NoFlowLogger;

impl FlowLogger for NoFlowLogger {
    fn log(&self, _event: FlowEvent) {}
}
