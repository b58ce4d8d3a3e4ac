//! HTTP rephrase gateway.
//!
//! Implements the [`RephraseGateway`] port against the deployment invoke
//! endpoint. The reqwest client is built once at startup with the
//! configured timeout and shared across requests; no retries happen here,
//! a failed invoke fails the whole flow request.

use crate::config::FileRephraseConfig;
use crate::rephrase::protocol::{InvokeInputs, InvokeRequest, InvokeResponse};
use async_trait::async_trait;
use intake_application::ports::rephrase::{RephraseError, RephraseGateway};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

pub struct HttpRephraseGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    context: BTreeMap<String, Vec<String>>,
}

impl HttpRephraseGateway {
    /// Build the gateway from configuration.
    pub fn new(config: &FileRephraseConfig) -> Result<Self, RephraseError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RephraseError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            deployment: config.deployment.clone(),
            context: config.context.clone(),
        })
    }
}

#[async_trait]
impl RephraseGateway for HttpRephraseGateway {
    async fn rephrase(
        &self,
        question: &str,
        previous_context: &str,
    ) -> Result<String, RephraseError> {
        let body = InvokeRequest {
            key: self.deployment.clone(),
            context: self.context.clone(),
            inputs: InvokeInputs {
                question: question.to_string(),
                previous: previous_context.to_string(),
            },
        };

        debug!(deployment = %self.deployment, "Invoking rephrase deployment");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RephraseError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RephraseError::RequestFailed(format!(
                "HTTP {} from deployment endpoint",
                status.as_u16()
            )));
        }

        let invoke: InvokeResponse = response
            .json()
            .await
            .map_err(|e| RephraseError::RequestFailed(format!("invalid response body: {e}")))?;

        invoke
            .content()
            .map(str::to_string)
            .ok_or(RephraseError::EmptyResponse)
    }
}
