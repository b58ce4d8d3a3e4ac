//! Question sheet adapters

pub mod xlsx;

pub use xlsx::XlsxQuestionSource;
