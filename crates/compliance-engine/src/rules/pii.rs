// GDPR-style personal data detection
use crate::patterns::{pii_pattern, MAX_MATCHES_PER_KIND, PII_KINDS};
use shared_types::Finding;

/// Run every PII matcher over the full text.
///
/// Findings come out grouped by kind (email, phone, ssn, date) and in match
/// order within a kind. Each kind is capped at [`MAX_MATCHES_PER_KIND`]
/// independently of the others.
pub fn detect_pii(text: &str) -> Vec<Finding> {
    PII_KINDS
        .iter()
        .flat_map(|&kind| {
            pii_pattern(kind)
                .find_iter(text)
                .take(MAX_MATCHES_PER_KIND)
                .map(move |m| Finding::pii(kind, m.as_str()))
        })
        .collect()
}
