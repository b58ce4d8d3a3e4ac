//! Next Question use case.
//!
//! The per-request flow: resolve the next eligible question in the bank,
//! have the rephrase deployment phrase it conversationally, and hand back
//! the phrased text with the question's quick-reply options.
//!
//! The caller is the system of record for answer history and supplies only
//! the single most recent answer; the use case itself keeps no state
//! between calls.

use crate::ports::flow_logger::{FlowEvent, FlowLogger, NoFlowLogger};
use crate::ports::rephrase::{RephraseError, RephraseGateway};
use intake_domain::{FlowError, QuestionBank, resolve};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while serving the next question.
#[derive(Error, Debug)]
pub enum NextQuestionError {
    #[error("invalid question position: {0}")]
    InvalidPosition(usize),

    #[error("no eligible question at or after position {0}")]
    Exhausted(usize),

    #[error("Rephrase call failed: {0}")]
    RephraseFailed(#[from] RephraseError),
}

impl From<FlowError> for NextQuestionError {
    fn from(error: FlowError) -> Self {
        match error {
            FlowError::InvalidPosition(position) => NextQuestionError::InvalidPosition(position),
            FlowError::Exhausted(position) => NextQuestionError::Exhausted(position),
        }
    }
}

/// Input for the [`NextQuestionUseCase`].
#[derive(Debug, Clone)]
pub struct NextQuestionInput {
    /// 1-based position to start the scan at.
    pub current_position: usize,
    /// The previously shown question, as the caller phrased it.
    pub previous_question: Option<String>,
    /// The answer the user gave to that question.
    pub previous_answer: Option<String>,
}

impl NextQuestionInput {
    pub fn new(current_position: usize) -> Self {
        Self {
            current_position,
            previous_question: None,
            previous_answer: None,
        }
    }

    pub fn with_previous(
        mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        self.previous_question = Some(question.into());
        self.previous_answer = Some(answer.into());
        self
    }
}

/// Output of the [`NextQuestionUseCase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextQuestionOutput {
    /// The question text as phrased by the rephrase deployment.
    pub rephrased_text: String,
    /// Quick-reply options of the served question; empty for free text.
    pub quick_reply_options: Vec<String>,
}

/// Use case for serving the next question of the flow.
///
/// Holds the process-wide read-only bank and the rephrase gateway; safe to
/// share across concurrent requests without locking.
pub struct NextQuestionUseCase {
    bank: Arc<QuestionBank>,
    gateway: Arc<dyn RephraseGateway>,
    flow_logger: Arc<dyn FlowLogger>,
}

impl NextQuestionUseCase {
    pub fn new(bank: Arc<QuestionBank>, gateway: Arc<dyn RephraseGateway>) -> Self {
        Self {
            bank,
            gateway,
            flow_logger: Arc::new(NoFlowLogger),
        }
    }

    /// Attach a flow logger.
    pub fn with_flow_logger(mut self, logger: Arc<dyn FlowLogger>) -> Self {
        self.flow_logger = logger;
        self
    }

    /// The bank this use case serves from.
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Resolve and rephrase the next question.
    pub async fn execute(
        &self,
        input: NextQuestionInput,
    ) -> Result<NextQuestionOutput, NextQuestionError> {
        let previous_answer = input.previous_answer.as_deref();
        debug!(
            position = input.current_position,
            answer = previous_answer.unwrap_or(""),
            "Resolving next question"
        );

        let record = match resolve(&self.bank, input.current_position, previous_answer) {
            Ok(record) => record,
            Err(error) => {
                let kind = match &error {
                    FlowError::InvalidPosition(_) => "invalid_position",
                    FlowError::Exhausted(_) => "flow_exhausted",
                };
                self.flow_logger.log(
                    FlowEvent::new(kind, input.current_position)
                        .with_previous_answer(previous_answer),
                );
                return Err(error.into());
            }
        };

        let context = previous_context(
            input.previous_question.as_deref(),
            input.previous_answer.as_deref(),
        );

        let rephrased = match self.gateway.rephrase(record.text(), &context).await {
            Ok(text) => text,
            Err(error) => {
                self.flow_logger.log(
                    FlowEvent::new("rephrase_failed", input.current_position)
                        .with_previous_answer(previous_answer)
                        .with_served_index(record.index()),
                );
                return Err(error.into());
            }
        };

        info!(
            position = input.current_position,
            index = record.index(),
            "Serving question"
        );
        self.flow_logger.log(
            FlowEvent::new("question_served", input.current_position)
                .with_previous_answer(previous_answer)
                .with_served_index(record.index()),
        );

        Ok(NextQuestionOutput {
            rephrased_text: rephrased,
            quick_reply_options: record.options().to_vec(),
        })
    }
}

/// Build the conversational context passed to the rephrase deployment.
///
/// Empty unless both the previous question and answer are present and
/// non-empty.
fn previous_context(question: Option<&str>, answer: Option<&str>) -> String {
    match (question, answer) {
        (Some(q), Some(a)) if !q.is_empty() && !a.is_empty() => {
            format!("Vraag: {q}\nAntwoord: {a}")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use intake_domain::{BankBuilder, RawQuestionRow};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Echoes the question prefixed with a marker, and records the
    /// context it was called with.
    struct EchoGateway {
        contexts: Mutex<Vec<String>>,
    }

    impl EchoGateway {
        fn new() -> Self {
            Self {
                contexts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RephraseGateway for EchoGateway {
        async fn rephrase(
            &self,
            question: &str,
            previous_context: &str,
        ) -> Result<String, RephraseError> {
            self.contexts
                .lock()
                .unwrap()
                .push(previous_context.to_string());
            Ok(format!("rephrased: {question}"))
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl RephraseGateway for FailingGateway {
        async fn rephrase(&self, _: &str, _: &str) -> Result<String, RephraseError> {
            Err(RephraseError::RequestFailed("503".to_string()))
        }
    }

    struct RecordingLogger {
        events: Mutex<Vec<FlowEvent>>,
    }

    impl FlowLogger for RecordingLogger {
        fn log(&self, event: FlowEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn test_bank() -> Arc<QuestionBank> {
        let (bank, warnings) = BankBuilder::new()
            .extend([
                RawQuestionRow::new(
                    "1",
                    "Eerste vraag",
                    vec!["a".to_string(), "b".to_string()],
                    None,
                ),
                RawQuestionRow::new("2", "Tweede vraag", vec![], Some("1=b".to_string())),
                RawQuestionRow::new("3", "Derde vraag", vec![], None),
            ])
            .build();
        assert!(warnings.is_empty());
        Arc::new(bank)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_serves_rephrased_question_with_options() {
        let use_case = NextQuestionUseCase::new(test_bank(), Arc::new(EchoGateway::new()));

        let output = use_case.execute(NextQuestionInput::new(1)).await.unwrap();

        assert_eq!(output.rephrased_text, "rephrased: Eerste vraag");
        assert_eq!(output.quick_reply_options, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_skips_unmet_condition() {
        let use_case = NextQuestionUseCase::new(test_bank(), Arc::new(EchoGateway::new()));

        let input = NextQuestionInput::new(2).with_previous("Eerste vraag", "a");
        let output = use_case.execute(input).await.unwrap();

        assert_eq!(output.rephrased_text, "rephrased: Derde vraag");
        assert!(output.quick_reply_options.is_empty());
    }

    #[tokio::test]
    async fn test_context_includes_previous_pair() {
        let gateway = Arc::new(EchoGateway::new());
        let use_case = NextQuestionUseCase::new(test_bank(), gateway.clone());

        let input = NextQuestionInput::new(2).with_previous("Eerste vraag", "b");
        use_case.execute(input).await.unwrap();

        let contexts = gateway.contexts.lock().unwrap();
        assert_eq!(contexts[0], "Vraag: Eerste vraag\nAntwoord: b");
    }

    #[tokio::test]
    async fn test_context_empty_without_previous_pair() {
        let gateway = Arc::new(EchoGateway::new());
        let use_case = NextQuestionUseCase::new(test_bank(), gateway.clone());

        use_case.execute(NextQuestionInput::new(1)).await.unwrap();

        let contexts = gateway.contexts.lock().unwrap();
        assert_eq!(contexts[0], "");
    }

    #[tokio::test]
    async fn test_invalid_position() {
        let use_case = NextQuestionUseCase::new(test_bank(), Arc::new(EchoGateway::new()));

        let result = use_case.execute(NextQuestionInput::new(0)).await;
        assert!(matches!(result, Err(NextQuestionError::InvalidPosition(0))));
    }

    #[tokio::test]
    async fn test_exhausted_flow() {
        let use_case = NextQuestionUseCase::new(test_bank(), Arc::new(EchoGateway::new()));

        let result = use_case.execute(NextQuestionInput::new(4)).await;
        assert!(matches!(result, Err(NextQuestionError::Exhausted(4))));
    }

    #[tokio::test]
    async fn test_rephrase_failure_propagates() {
        let use_case = NextQuestionUseCase::new(test_bank(), Arc::new(FailingGateway));

        let result = use_case.execute(NextQuestionInput::new(1)).await;
        assert!(matches!(
            result,
            Err(NextQuestionError::RephraseFailed(
                RephraseError::RequestFailed(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_flow_events_are_emitted() {
        let logger = Arc::new(RecordingLogger {
            events: Mutex::new(Vec::new()),
        });
        let use_case = NextQuestionUseCase::new(test_bank(), Arc::new(EchoGateway::new()))
            .with_flow_logger(logger.clone());

        use_case.execute(NextQuestionInput::new(1)).await.unwrap();
        let _ = use_case.execute(NextQuestionInput::new(9)).await;

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, "question_served");
        assert_eq!(events[0].served_index.as_deref(), Some("1"));
        assert_eq!(events[1].kind, "flow_exhausted");
        assert_eq!(events[1].start_position, 9);
    }
}
