//! Compliance evaluation for extracted document text
//!
//! Local regex rules (PII patterns and financial-control keywords) always
//! run. An optional advisory model adds supplementary findings when it is
//! configured and answers with something usable.

pub mod advisory;
pub mod patterns;
pub mod rules;
pub mod summary;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared_types::{
    ComplianceRequest, ComplianceSummary, Finding, S3Location, Status, ValidationError,
};
use tracing::{info, instrument};

pub use advisory::{
    request_advisory_checks, AdvisoryError, AdvisoryModelClient, AdvisoryModelSettings,
    AdvisoryResponse,
};
pub use summary::{normalize_severity, summarize};

#[derive(Debug, thiserror::Error)]
pub enum ComplianceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Compliance stage output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub status: Status,
    pub contract_id: String,
    pub s3: S3Location,
    pub findings: Vec<Finding>,
    pub summary: ComplianceSummary,
    /// True only when the advisory model produced mergeable output
    #[serde(rename = "bedrock_used")]
    pub advisory_used: bool,
    /// `null` when no advisory model is configured
    #[serde(rename = "bedrock_response")]
    pub advisory_response: Option<AdvisoryResponse>,
}

/// ComplianceEngine entry point
#[derive(Clone, Default)]
pub struct ComplianceEngine {
    advisory: Option<Arc<dyn AdvisoryModelClient>>,
}

impl ComplianceEngine {
    /// Engine running the local rules only
    pub fn new() -> Self {
        Self { advisory: None }
    }

    /// Engine that also consults an advisory model
    pub fn with_advisory(client: Arc<dyn AdvisoryModelClient>) -> Self {
        Self {
            advisory: Some(client),
        }
    }

    pub fn advisory_enabled(&self) -> bool {
        self.advisory.is_some()
    }

    /// Run the local rules: PII findings, then keyword indicators
    pub fn check_text(&self, text: &str) -> Vec<Finding> {
        let mut findings = rules::detect_pii(text);
        findings.extend(rules::detect_keyword_indicators(text));
        findings
    }

    /// Evaluate one document.
    ///
    /// Only validation can fail. Advisory failures are recorded in the
    /// report and the local findings are returned regardless.
    #[instrument(skip_all, fields(contract_id = tracing::field::Empty))]
    pub async fn evaluate(
        &self,
        request: &ComplianceRequest,
    ) -> Result<ComplianceReport, ComplianceError> {
        let document = request.validate()?;
        tracing::Span::current().record("contract_id", document.contract_id.as_str());

        let advisory_response = match &self.advisory {
            Some(client) => Some(request_advisory_checks(client.as_ref(), &document.text).await),
            None => None,
        };

        let advisory_findings = advisory_response.as_ref().and_then(AdvisoryResponse::findings);
        let advisory_used = advisory_findings.is_some();

        let mut findings = advisory_findings.unwrap_or_default();
        findings.extend(self.check_text(&document.text));

        let summary = summarize(&findings);
        info!(
            n_findings = summary.n_findings,
            high = summary.by_severity.high,
            medium = summary.by_severity.medium,
            low = summary.by_severity.low,
            advisory_used,
            "Compliance evaluation complete"
        );

        Ok(ComplianceReport {
            status: Status::Ok,
            contract_id: document.contract_id,
            s3: document.location,
            findings,
            summary,
            advisory_used,
            advisory_response,
        })
    }
}
