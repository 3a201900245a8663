//! Severity-bucketed summary over a finding list

use shared_types::{ComplianceSummary, Finding, Severity, SeverityCounts, SeverityLabel};

/// Fold a finding's severity onto {high, medium, low}.
///
/// This is the only place unknown or missing severities become `low`; the
/// findings themselves keep whatever label they were created with.
pub fn normalize_severity(label: Option<&SeverityLabel>) -> Severity {
    match label {
        Some(SeverityLabel::Known(severity)) => *severity,
        Some(SeverityLabel::Raw(serde_json::Value::String(raw))) => Severity::ALL
            .into_iter()
            .find(|s| s.as_str() == raw)
            .unwrap_or(Severity::Low),
        _ => Severity::Low,
    }
}

pub fn summarize(findings: &[Finding]) -> ComplianceSummary {
    let mut by_severity = SeverityCounts::default();
    for finding in findings {
        by_severity.increment(normalize_severity(finding.severity.as_ref()));
    }

    ComplianceSummary {
        n_findings: findings.len(),
        by_severity,
    }
}
