//! Bedrock Runtime implementation of the advisory model client

use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use compliance_engine::advisory::parse_model_output;
use compliance_engine::{AdvisoryError, AdvisoryModelClient, AdvisoryModelSettings};
use serde_json::Value;
use tracing::instrument;

pub struct BedrockAdvisoryClient {
    client: BedrockClient,
    settings: AdvisoryModelSettings,
}

impl BedrockAdvisoryClient {
    pub fn new(client: BedrockClient, settings: AdvisoryModelSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl AdvisoryModelClient for BedrockAdvisoryClient {
    fn model_id(&self) -> &str {
        &self.settings.model_id
    }

    #[instrument(skip_all, fields(model = %self.settings.model_id))]
    async fn invoke(&self, prompt: &str) -> Result<Value, AdvisoryError> {
        let body = self.settings.request_body(prompt).to_string();

        let output = self
            .client
            .invoke_model()
            .model_id(&self.settings.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body.into_bytes()))
            .send()
            .await
            .map_err(classify_invoke_error)?;

        parse_model_output(output.body().as_ref())
    }
}

/// Sort an InvokeModel failure by what the service reported
pub fn classify_invoke_error<R: std::fmt::Debug>(
    err: SdkError<InvokeModelError, R>,
) -> AdvisoryError {
    let detail = DisplayErrorContext(&err).to_string();

    match err.as_service_error() {
        Some(e)
            if e.is_access_denied_exception()
                || e.is_resource_not_found_exception()
                || e.is_service_unavailable_exception()
                || e.is_model_not_ready_exception() =>
        {
            AdvisoryError::Unavailable(detail)
        }
        Some(e) if e.is_validation_exception() => AdvisoryError::Rejected(detail),
        Some(e) if e.is_throttling_exception() || e.is_service_quota_exceeded_exception() => {
            AdvisoryError::Throttled(detail)
        }
        Some(_) => AdvisoryError::Service(detail),
        None => AdvisoryError::Transport(detail),
    }
}
