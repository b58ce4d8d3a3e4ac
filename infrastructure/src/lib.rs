//! Infrastructure layer for intake-flow
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod logging;
pub mod rephrase;
pub mod sheet;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileLoggingConfig, FileRephraseConfig, FileServerConfig,
    FileSheetConfig,
};
pub use logging::JsonlFlowLogger;
pub use rephrase::HttpRephraseGateway;
pub use sheet::XlsxQuestionSource;
