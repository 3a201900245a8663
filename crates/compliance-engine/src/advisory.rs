//! Advisory model adapter
//!
//! Supplementary, non-authoritative checks by a hosted generative model. The
//! adapter is a soft dependency: [`request_advisory_checks`] never fails, it
//! reports an unavailable [`AdvisoryResponse`] instead, and the local rules run
//! regardless of what happens here.
//!
//! The pieces are split so each can be swapped or tested on its own:
//! - [`AdvisoryModelSettings`] - model selection and request shaping (pure config)
//! - [`AdvisoryModelClient`] - transport, implemented per provider
//! - [`parse_model_output`] - response decoding
//! - [`AdvisoryResponse::findings`] - mapping onto [`Finding`]s

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{Finding, RuleId, SeverityLabel};
use tracing::{info, instrument, warn};

/// Model used when `BEDROCK_MODEL_ID` is not set
pub const DEFAULT_MODEL_ID: &str = "global.amazon.nova-2-lite-v1:0";

/// Generation budget per advisory request
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Document characters forwarded to the model
pub const MAX_PROMPT_CHARS: usize = 2000;

/// Which model to call and how to shape the request body
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryModelSettings {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AdvisoryModelSettings {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
        }
    }
}

impl AdvisoryModelSettings {
    /// Messages-style chat body understood by Nova and most hosted chat models
    pub fn request_body(&self, prompt: &str) -> Value {
        json!({
            "inferenceConfig": {
                "maxTokens": self.max_tokens,
                "temperature": self.temperature,
            },
            "messages": [
                {
                    "role": "user",
                    "content": [{ "text": prompt }],
                }
            ],
        })
    }
}

/// Advisory call failures, classified by the client that saw them
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdvisoryError {
    #[error("Advisory model is unavailable: {0}")]
    Unavailable(String),

    #[error("Advisory model rejected the request: {0}")]
    Rejected(String),

    #[error("Advisory model throttled the request: {0}")]
    Throttled(String),

    #[error("Advisory model service error: {0}")]
    Service(String),

    #[error("Advisory model unreachable: {0}")]
    Transport(String),

    #[error("Advisory model returned malformed output: {0}")]
    MalformedResponse(String),
}

/// Transport to a hosted advisory model
#[async_trait]
pub trait AdvisoryModelClient: Send + Sync {
    /// Identifier of the model this client invokes
    fn model_id(&self) -> &str;

    /// Send one prompt and return the model's parsed JSON output
    async fn invoke(&self, prompt: &str) -> Result<Value, AdvisoryError>;
}

/// Outcome of one advisory call, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    #[serde(rename = "bedrock_ok")]
    pub available: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(rename = "used_model", default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

impl AdvisoryResponse {
    pub fn available(model_id: &str, result: Value) -> Self {
        Self {
            available: true,
            result: Some(result),
            error: None,
            model_id: Some(model_id.to_string()),
        }
    }

    pub fn unavailable(model_id: Option<&str>, error: impl Into<String>) -> Self {
        Self {
            available: false,
            result: None,
            error: Some(error.into()),
            model_id: model_id.map(str::to_string),
        }
    }

    /// Map the model output onto findings.
    ///
    /// Returns `None` when there is nothing to merge: the call failed, or the
    /// result is not a non-empty JSON object. `pii` and `issues` entries are
    /// copied as-is into the finding detail; fields that are not lists are
    /// ignored.
    pub fn findings(&self) -> Option<Vec<Finding>> {
        let result = self.result.as_ref()?.as_object()?;
        if !self.available || result.is_empty() {
            return None;
        }

        let mut findings = Vec::new();

        if let Some(Value::Array(entries)) = result.get("pii") {
            findings.extend(entries.iter().map(|entry| {
                Finding::advisory(
                    RuleId::GdprPiiBedrock,
                    entry.clone(),
                    Some(RuleId::GdprPiiBedrock.default_severity().into()),
                )
            }));
        }

        if let Some(Value::Array(entries)) = result.get("issues") {
            findings.extend(entries.iter().map(|entry| {
                Finding::advisory(
                    RuleId::SoxOrOtherBedrock,
                    entry.clone(),
                    Some(issue_severity(entry)),
                )
            }));
        }

        Some(findings)
    }
}

/// Structured issues carry their own severity when they name one
fn issue_severity(entry: &Value) -> SeverityLabel {
    match entry.as_object().and_then(|obj| obj.get("severity")) {
        Some(raw) => serde_json::from_value(raw.clone()).unwrap_or(SeverityLabel::Raw(raw.clone())),
        None => RuleId::SoxOrOtherBedrock.default_severity().into(),
    }
}

/// Instruction sent to the advisory model
pub fn build_prompt(text: &str) -> String {
    let document = match text.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    };

    format!(
        "You are a compliance assistant. Given the following document text, \
         return a JSON object with two keys: 'pii' (list of detected PII types and examples) \
         and 'issues' (list of compliance issues with short explanations).\n\n\
         Document:\n{document}\n\n\
         Respond ONLY with valid JSON."
    )
}

/// Decode a raw model response body.
///
/// Chat envelopes (`output.message.content[*].text`) are unwrapped and their
/// text, minus any Markdown code fence, parsed as JSON. Any other JSON body is
/// taken as the result itself.
pub fn parse_model_output(raw: &[u8]) -> Result<Value, AdvisoryError> {
    let body: Value = serde_json::from_slice(raw)
        .map_err(|e| AdvisoryError::MalformedResponse(format!("response body is not JSON: {e}")))?;

    match envelope_text(&body) {
        Some(text) => serde_json::from_str(strip_code_fence(&text)).map_err(|e| {
            AdvisoryError::MalformedResponse(format!("model text is not JSON: {e}"))
        }),
        None => Ok(body),
    }
}

fn envelope_text(body: &Value) -> Option<String> {
    let parts = body.pointer("/output/message/content")?.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    (!text.is_empty()).then_some(text)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            // Drop the info string ("json") on the opening fence line
            let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
            body.trim_end().strip_suffix("```").unwrap_or(body).trim()
        }
        None => trimmed,
    }
}

/// Ask the advisory model for supplementary checks. Never fails.
#[instrument(skip_all, fields(model = %client.model_id()))]
pub async fn request_advisory_checks(
    client: &dyn AdvisoryModelClient,
    text: &str,
) -> AdvisoryResponse {
    let prompt = build_prompt(text);

    match client.invoke(&prompt).await {
        Ok(result) => {
            info!("Advisory model returned a response");
            AdvisoryResponse::available(client.model_id(), result)
        }
        Err(err) => {
            match &err {
                AdvisoryError::Unavailable(_) => info!(error = %err, "Advisory model unavailable"),
                _ => warn!(error = %err, "Advisory model call failed"),
            }
            AdvisoryResponse::unavailable(Some(client.model_id()), err.to_string())
        }
    }
}
