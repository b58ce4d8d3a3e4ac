//! Rephrase gateway port
//!
//! Defines the interface for the external paraphrasing deployment that
//! turns a raw question string into a conversationally phrased variant.
//! Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a rephrase call.
#[derive(Error, Debug)]
pub enum RephraseError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Deployment returned no content")]
    EmptyResponse,
}

/// Gateway to the rephrasing deployment.
///
/// The call is awaited without holding any shared lock and is not retried
/// by the core; a failure fails the whole request. Timeout policy belongs
/// to the adapter.
#[async_trait]
pub trait RephraseGateway: Send + Sync {
    /// Rephrase a question given lightweight conversational context
    /// (the previous question/answer pair, or an empty string).
    async fn rephrase(
        &self,
        question: &str,
        previous_context: &str,
    ) -> Result<String, RephraseError>;
}
