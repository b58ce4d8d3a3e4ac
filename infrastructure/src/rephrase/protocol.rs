//! Wire types for the deployment invoke endpoint.
//!
//! The rephrase service is an LLM deployment platform: an invoke takes a
//! deployment key, a routing context, and prompt inputs, and answers in a
//! chat-completion shape. Only the first choice's message content is used.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request body for `POST <endpoint>`.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeRequest {
    /// Deployment key selecting the questionnaire prompt.
    pub key: String,
    /// Static routing context configured per installation.
    pub context: BTreeMap<String, Vec<String>>,
    /// Prompt inputs.
    pub inputs: InvokeInputs,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvokeInputs {
    /// The raw question text to rephrase.
    pub question: String,
    /// Previous question/answer context, or empty.
    pub previous: String,
}

/// Response body of a successful invoke.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeResponse {
    #[serde(default)]
    pub choices: Vec<InvokeChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvokeChoice {
    pub message: InvokeMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvokeMessage {
    pub content: String,
}

impl InvokeResponse {
    /// The rephrased text, when the deployment produced one.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .filter(|content| !content.is_empty())
    }
}
