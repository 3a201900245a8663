//! Regex patterns and keyword lists for the local rules

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::PiiKind;

/// Maximum findings emitted per PII pattern kind
pub const MAX_MATCHES_PER_KIND: usize = 10;

/// Characters of context kept on each side of a keyword match
pub const CONTEXT_RADIUS: usize = 40;

/// Financial-control and audit keywords (lower case, in evaluation order)
pub const SOX_KEYWORDS: &[&str] = &[
    "revenue",
    "net income",
    "financial statements",
    "internal control",
    "material weakness",
    "fraud",
    "audit",
    "compliance",
    "whistleblow",
];

/// PII kinds in evaluation order
pub const PII_KINDS: [PiiKind; 4] = [PiiKind::Email, PiiKind::Phone, PiiKind::Ssn, PiiKind::Date];

lazy_static! {
    /// Domain labels must be followed by a label, so sentence punctuation
    /// after an address is not swallowed
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)+").unwrap();

    /// Optional country code, 2-4 digit area code, then 3 + 3-4 digits.
    /// Separators are limited to space, dot and dash so OCR line breaks never
    /// join two numbers.
    static ref PHONE_PATTERN: Regex =
        Regex::new(r"(?:\+\d{1,3}[ .-]?)?(?:\(\d{2,4}\)|\b\d{2,4})[ .-]?\d{3}[ .-]?\d{3,4}\b").unwrap();

    /// US SSN-ish, very approximate
    static ref SSN_PATTERN: Regex = Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap();

    /// Numeric dates (DOBs, deadlines)
    static ref DATE_PATTERN: Regex =
        Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap();

    /// Case-insensitive matcher per keyword, same order as [`SOX_KEYWORDS`]
    pub static ref KEYWORD_PATTERNS: Vec<(&'static str, Regex)> = SOX_KEYWORDS
        .iter()
        .map(|kw| (*kw, Regex::new(&format!("(?i){}", regex::escape(kw))).unwrap()))
        .collect();
}

/// Pattern used for a PII kind
pub fn pii_pattern(kind: PiiKind) -> &'static Regex {
    match kind {
        PiiKind::Email => &*EMAIL_PATTERN,
        PiiKind::Phone => &*PHONE_PATTERN,
        PiiKind::Ssn => &*SSN_PATTERN,
        PiiKind::Date => &*DATE_PATTERN,
    }
}

/// Slice `radius` characters either side of `start..end`, clipped to the
/// text and trimmed. Offsets are byte offsets on char boundaries (as returned
/// by regex matches).
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let window_start = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);
    let window_end = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    text[window_start..window_end].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        let re = pii_pattern(PiiKind::Email);
        assert_eq!(
            re.find("Contact: alice@example.com. Audit required.").map(|m| m.as_str()),
            Some("alice@example.com")
        );
        assert_eq!(
            re.find("mail j.doe+x@mail.example.co.uk, please").map(|m| m.as_str()),
            Some("j.doe+x@mail.example.co.uk")
        );
        assert!(!re.is_match("no address here @ all"));
    }

    #[test]
    fn test_keyword_patterns_ignore_case() {
        let (kw, re) = &KEYWORD_PATTERNS[4];
        assert_eq!(*kw, "material weakness");
        assert!(re.is_match("identified a MATERIAL Weakness in controls"));
    }

    #[test]
    fn test_phone_pattern() {
        let re = pii_pattern(PiiKind::Phone);
        assert!(re.is_match("call (555) 123-4567 today"));
        assert!(re.is_match("+1 555.123.4567"));
        assert!(re.is_match("+48 22 123 4567"));
        // Zip codes, years and amounts are not phone numbers
        assert!(!re.is_match("San Francisco, CA 94105"));
        assert!(!re.is_match("as of March 1, 2026"));
        assert!(!re.is_match("interest at 1.5% per month"));
    }

    #[test]
    fn test_date_and_ssn_patterns() {
        assert!(pii_pattern(PiiKind::Date).is_match("born 03/14/1985"));
        assert!(pii_pattern(PiiKind::Date).is_match("due 1-2-26"));
        assert!(pii_pattern(PiiKind::Ssn).is_match("SSN 123-45-6789."));
        assert!(!pii_pattern(PiiKind::Ssn).is_match("1234-45-6789"));
    }

    #[test]
    fn test_context_window_clips_to_bounds() {
        let text = "Audit required.";
        assert_eq!(context_window(text, 0, 5, 40), "Audit required.");
    }

    #[test]
    fn test_context_window_radius() {
        let text = format!("{}KEY{}", "a".repeat(50), "b".repeat(50));
        let window = context_window(&text, 50, 53, 40);
        assert_eq!(window, format!("{}KEY{}", "a".repeat(40), "b".repeat(40)));
    }

    #[test]
    fn test_context_window_multibyte() {
        let text = "żółw audit ćma";
        let start = text.find("audit").unwrap();
        assert_eq!(context_window(text, start, start + 5, 2), "w audit ć");
    }
}
