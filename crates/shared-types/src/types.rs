use serde::{Deserialize, Serialize};

/// Location of a stored object (S3 bucket + key)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Location {
    pub bucket: String,
    pub key: String,
}

/// A document handed to the pipeline by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub contract_id: String,
    pub location: S3Location,
}

/// Text recovered from one document by the OCR service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub lines: Vec<String>,
    pub text: String,
    pub n_lines: usize,
    pub n_chars: usize,
}

impl ExtractionResult {
    /// Build the result from OCR lines in reading order
    pub fn from_lines(lines: Vec<String>) -> Self {
        let text = lines.join("\n");
        Self {
            n_lines: lines.len(),
            n_chars: text.chars().count(),
            lines,
            text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity as carried on a finding.
///
/// Findings produced by the local rules always carry a [`Severity`]. Findings
/// copied from the advisory model keep whatever the model said, which may be
/// an unknown label or not a string at all; those are only folded into
/// `low` when a summary is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeverityLabel {
    Known(Severity),
    Raw(serde_json::Value),
}

impl From<Severity> for SeverityLabel {
    fn from(severity: Severity) -> Self {
        SeverityLabel::Known(severity)
    }
}

/// Rule that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Local PII pattern match
    GdprPii,
    /// Local financial-control keyword
    SoxKeyword,
    /// PII entry reported by the advisory model
    GdprPiiBedrock,
    /// Issue entry reported by the advisory model
    SoxOrOtherBedrock,
}

impl RuleId {
    /// Severity assigned when the rule creates a finding
    pub fn default_severity(&self) -> Severity {
        match self {
            RuleId::GdprPii | RuleId::GdprPiiBedrock => Severity::High,
            RuleId::SoxKeyword | RuleId::SoxOrOtherBedrock => Severity::Medium,
        }
    }
}

/// Kinds of personal data the pattern matchers look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PiiKind {
    Email,
    Phone,
    Ssn,
    Date,
}

impl PiiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiKind::Email => "email",
            PiiKind::Phone => "phone",
            PiiKind::Ssn => "ssn",
            PiiKind::Date => "date",
        }
    }
}

/// Rule-specific payload of a finding, flattened into the finding object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FindingDetail {
    Pattern {
        #[serde(rename = "type")]
        kind: PiiKind,
        #[serde(rename = "match")]
        matched: String,
    },
    Keyword {
        keyword: String,
        #[serde(rename = "match")]
        context: String,
    },
    Advisory {
        detail: serde_json::Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: RuleId,
    #[serde(flatten)]
    pub detail: FindingDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityLabel>,
}

impl Finding {
    pub fn pii(kind: PiiKind, matched: impl Into<String>) -> Self {
        Self {
            rule_id: RuleId::GdprPii,
            detail: FindingDetail::Pattern {
                kind,
                matched: matched.into(),
            },
            severity: Some(RuleId::GdprPii.default_severity().into()),
        }
    }

    pub fn keyword(keyword: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            rule_id: RuleId::SoxKeyword,
            detail: FindingDetail::Keyword {
                keyword: keyword.into(),
                context: context.into(),
            },
            severity: Some(RuleId::SoxKeyword.default_severity().into()),
        }
    }

    pub fn advisory(
        rule_id: RuleId,
        detail: serde_json::Value,
        severity: Option<SeverityLabel>,
    ) -> Self {
        Self {
            rule_id,
            detail: FindingDetail::Advisory { detail },
            severity,
        }
    }
}

/// Per-severity counts over a finding list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub n_findings: usize,
    pub by_severity: SeverityCounts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extraction_result_counts() {
        let result = ExtractionResult::from_lines(vec!["Zażółć".to_string(), "gęślą".to_string()]);
        assert_eq!(result.n_lines, 2);
        assert_eq!(result.text, "Zażółć\ngęślą");
        // Characters, not bytes
        assert_eq!(result.n_chars, 12);
    }

    #[test]
    fn test_empty_extraction_result() {
        let result = ExtractionResult::from_lines(vec![]);
        assert_eq!(result.n_lines, 0);
        assert_eq!(result.n_chars, 0);
        assert_eq!(result.text, "");
    }

    #[test]
    fn test_pii_finding_wire_shape() {
        let finding = Finding::pii(PiiKind::Email, "alice@example.com");
        assert_eq!(
            serde_json::to_value(&finding).unwrap(),
            json!({
                "rule_id": "gdpr_pii",
                "type": "email",
                "match": "alice@example.com",
                "severity": "high",
            })
        );
    }

    #[test]
    fn test_keyword_finding_wire_shape() {
        let finding = Finding::keyword("audit", "Audit required.");
        assert_eq!(
            serde_json::to_value(&finding).unwrap(),
            json!({
                "rule_id": "sox_keyword",
                "keyword": "audit",
                "match": "Audit required.",
                "severity": "medium",
            })
        );
    }

    #[test]
    fn test_advisory_finding_keeps_raw_severity() {
        let finding = Finding::advisory(
            RuleId::SoxOrOtherBedrock,
            json!({"issue": "late fees", "severity": "critical"}),
            Some(SeverityLabel::Raw(json!("critical"))),
        );
        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["rule_id"], "sox_or_other_bedrock");
        assert_eq!(value["severity"], "critical");
        assert_eq!(value["detail"]["issue"], "late fees");
    }

    #[test]
    fn test_missing_severity_is_omitted() {
        let finding = Finding::advisory(RuleId::GdprPiiBedrock, json!("email"), None);
        let value = serde_json::to_value(&finding).unwrap();
        assert!(value.get("severity").is_none());
    }

    #[test]
    fn test_severity_label_parses_known_values() {
        let label: SeverityLabel = serde_json::from_value(json!("medium")).unwrap();
        assert_eq!(label, SeverityLabel::Known(Severity::Medium));

        let label: SeverityLabel = serde_json::from_value(json!("urgent")).unwrap();
        assert_eq!(label, SeverityLabel::Raw(json!("urgent")));
    }

    #[test]
    fn test_rule_default_severity() {
        assert_eq!(RuleId::GdprPii.default_severity(), Severity::High);
        assert_eq!(RuleId::SoxKeyword.default_severity(), Severity::Medium);
    }
}
