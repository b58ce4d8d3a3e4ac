//! Domain layer for intake-flow
//!
//! This crate contains the core business logic of the questionnaire flow
//! engine. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Question Bank
//!
//! One ordered, immutable sequence of [`QuestionRecord`]s: a fixed set of
//! lead-in questions followed by sheet-sourced questions. Position in the
//! sequence (1-based), not the `index` value, determines traversal order.
//!
//! ## Flow Resolution
//!
//! Given a start position and the single most recent answer, [`resolve`]
//! walks the bank forward and returns the first question whose prerequisite
//! [`Condition`] (if any) is satisfied. Conditions gated on answers more
//! than one step back are unsupported by design: the caller is the system
//! of record for answer history and supplies only the previous answer.

pub mod core;
pub mod flow;
pub mod question;

// Re-export commonly used types
pub use core::error::FlowError;
pub use flow::resolver::resolve;
pub use question::{
    bank::{BankBuilder, BankWarning, QuestionBank},
    condition::{Condition, ConditionSpec},
    record::{QuestionRecord, RawQuestionRow},
};
