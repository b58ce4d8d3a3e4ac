//! Application layer for intake-flow
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; adapters for the ports live in the infrastructure
//! crate.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    flow_logger::{FlowEvent, FlowLogger, NoFlowLogger},
    question_source::{QuestionSource, SourceError},
    rephrase::{RephraseError, RephraseGateway},
};
pub use use_cases::build_bank::{BuildBankError, BuildBankUseCase, lead_in_questions};
pub use use_cases::next_question::{
    NextQuestionError, NextQuestionInput, NextQuestionOutput, NextQuestionUseCase,
};
