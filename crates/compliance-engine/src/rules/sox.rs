// SOX-style financial control keyword detection
use crate::patterns::{context_window, CONTEXT_RADIUS, KEYWORD_PATTERNS};
use shared_types::Finding;

/// Report the first occurrence of each financial-control keyword, with up to
/// [`CONTEXT_RADIUS`] characters of surrounding text on either side.
pub fn detect_keyword_indicators(text: &str) -> Vec<Finding> {
    KEYWORD_PATTERNS
        .iter()
        .filter_map(|(keyword, re)| {
            re.find(text).map(|m| {
                let context = context_window(text, m.start(), m.end(), CONTEXT_RADIUS);
                Finding::keyword(*keyword, context)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{FindingDetail, RuleId, Severity, SeverityLabel};

    fn keyword_and_context(finding: &Finding) -> (&str, &str) {
        match &finding.detail {
            FindingDetail::Keyword { keyword, context } => (keyword.as_str(), context.as_str()),
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_detects_audit_keyword() {
        let findings = detect_keyword_indicators("Contact: alice@example.com. Audit required.");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, RuleId::SoxKeyword);
        assert_eq!(findings[0].severity, Some(SeverityLabel::Known(Severity::Medium)));

        let (keyword, context) = keyword_and_context(&findings[0]);
        assert_eq!(keyword, "audit");
        assert!(context.contains("Audit required"));
    }

    #[test]
    fn test_first_occurrence_only() {
        let text = "Fraud was found. Later, more fraud. FRAUD everywhere.";
        let findings = detect_keyword_indicators(text);
        assert_eq!(findings.len(), 1);
        let (_, context) = keyword_and_context(&findings[0]);
        assert!(context.starts_with("Fraud was found."));
    }

    #[test]
    fn test_keyword_order_follows_list() {
        let text = "Audit of revenue showed a material weakness in internal control.";
        let keywords: Vec<_> = detect_keyword_indicators(text)
            .iter()
            .map(|f| keyword_and_context(f).0.to_string())
            .collect();
        assert_eq!(
            keywords,
            vec!["revenue", "internal control", "material weakness", "audit"]
        );
    }

    #[test]
    fn test_context_is_clipped_to_eighty_characters_around_match() {
        let text = format!("{} revenue {}", "x".repeat(100), "y".repeat(100));
        let findings = detect_keyword_indicators(&text);
        let (_, context) = keyword_and_context(&findings[0]);
        assert_eq!(context, format!("{} revenue {}", "x".repeat(39), "y".repeat(39)));
    }

    #[test]
    fn test_matches_inside_longer_words() {
        let findings = detect_keyword_indicators("The auditors and the whistleblower met.");
        let keywords: Vec<_> = findings.iter().map(|f| keyword_and_context(f).0).collect();
        assert_eq!(keywords, vec!["audit", "whistleblow"]);
    }
}
