//! Event payloads exchanged between the orchestrator and the two stages
//!
//! Inbound payloads are deliberately lenient (every field optional) so that a
//! missing field surfaces as a [`ValidationError`] naming it, instead of a
//! serde error about the first field it tripped over.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{DocumentReference, ExtractionResult, S3Location};

/// Discriminator carried on every stage result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// `s3` block as it arrives from the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3LocationInput {
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

impl From<&S3Location> for S3LocationInput {
    fn from(location: &S3Location) -> Self {
        Self {
            bucket: Some(location.bucket.clone()),
            key: Some(location.key.clone()),
        }
    }
}

/// Ingestion stage input: `{contract_id?, s3: {bucket, key}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub s3: Option<S3LocationInput>,
}

impl ExtractionRequest {
    /// Resolve the request into a document reference.
    ///
    /// Bucket and key are always required. An absent or empty contract id is
    /// replaced by a fresh UUID.
    pub fn validate(&self) -> Result<DocumentReference, ValidationError> {
        let s3 = self.s3.clone().unwrap_or_default();

        let mut missing = Vec::new();
        let bucket = non_empty(s3.bucket.as_deref());
        let key = non_empty(s3.key.as_deref());
        if bucket.is_none() {
            missing.push("s3.bucket");
        }
        if key.is_none() {
            missing.push("s3.key");
        }

        match (bucket, key) {
            (Some(bucket), Some(key)) => Ok(DocumentReference {
                contract_id: non_empty(self.contract_id.as_deref())
                    .map(str::to_string)
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                location: S3Location {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                },
            }),
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub n_lines: usize,
    pub n_chars: usize,
}

/// Ingestion stage success output, consumed by the compliance stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub status: Status,
    pub contract_id: String,
    pub s3: S3Location,
    pub extracted_text: String,
    pub extracted_lines: Vec<String>,
    pub metadata: ExtractionMetadata,
}

impl ExtractionOutput {
    pub fn new(document: DocumentReference, extraction: ExtractionResult) -> Self {
        Self {
            status: Status::Ok,
            contract_id: document.contract_id,
            s3: document.location,
            metadata: ExtractionMetadata {
                n_lines: extraction.n_lines,
                n_chars: extraction.n_chars,
            },
            extracted_text: extraction.text,
            extracted_lines: extraction.lines,
        }
    }
}

/// Compliance stage input.
///
/// Only the fields the evaluation reads are modelled. Anything else the
/// ingestion output carries (`status`, `extracted_lines`, `metadata`) is
/// ignored whatever its shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRequest {
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub s3: Option<S3LocationInput>,
    #[serde(default)]
    pub extracted_text: Option<String>,
}

/// A compliance request whose required fields are all present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDocument {
    pub contract_id: String,
    pub location: S3Location,
    pub text: String,
}

impl ComplianceRequest {
    /// Check `contract_id`, `s3.bucket`, `s3.key` and `extracted_text`,
    /// reporting every missing one in that order.
    pub fn validate(&self) -> Result<ValidatedDocument, ValidationError> {
        let s3 = self.s3.clone().unwrap_or_default();
        let contract_id = non_empty(self.contract_id.as_deref());
        let bucket = non_empty(s3.bucket.as_deref());
        let key = non_empty(s3.key.as_deref());
        let text = non_empty(self.extracted_text.as_deref());

        match (contract_id, bucket, key, text) {
            (Some(contract_id), Some(bucket), Some(key), Some(text)) => Ok(ValidatedDocument {
                contract_id: contract_id.to_string(),
                location: S3Location {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                },
                text: text.to_string(),
            }),
            (contract_id, bucket, key, text) => {
                let missing = [
                    ("contract_id", contract_id.is_none()),
                    ("s3.bucket", bucket.is_none()),
                    ("s3.key", key.is_none()),
                    ("extracted_text", text.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, is_missing)| is_missing.then_some(name))
                .collect();
                Err(ValidationError::MissingFields(missing))
            }
        }
    }
}

impl From<ExtractionOutput> for ComplianceRequest {
    fn from(output: ExtractionOutput) -> Self {
        Self {
            contract_id: Some(output.contract_id),
            s3: Some(S3LocationInput::from(&output.s3)),
            extracted_text: Some(output.extracted_text),
        }
    }
}

/// Structured failure returned by either stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3LocationInput>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            contract_id: None,
            s3: None,
        }
    }

    /// Attach the document the failure relates to
    pub fn for_document(mut self, document: &DocumentReference) -> Self {
        self.contract_id = Some(document.contract_id.clone());
        self.s3 = Some(S3LocationInput::from(&document.location));
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
