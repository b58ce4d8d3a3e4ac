//! Question bank: records, conditions, and the bank builder

pub mod bank;
pub mod condition;
pub mod record;

pub use bank::{BankBuilder, BankWarning, QuestionBank};
pub use condition::{Condition, ConditionSpec};
pub use record::{QuestionRecord, RawQuestionRow};
