//! Email extraction from free-form affiliation text.

use regex::Regex;
use std::sync::OnceLock;

/// Loose email pattern; not an RFC 5322 validator
const EMAIL_PATTERN: &str = r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+";

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
}

/// Return the first email address found in `text`, if any.
///
/// Later matches are ignored. Trailing punctuation that fits the pattern
/// (e.g. a final `.`) is kept as part of the match.
pub fn extract_email(text: &str) -> Option<&str> {
    email_regex()?.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_compiles() {
        assert!(email_regex().is_some());
    }

    #[test]
    fn test_extracts_embedded_email() {
        assert_eq!(
            extract_email("XYZ Pharma Inc, contact: a.b@xyzpharma.com"),
            Some("a.b@xyzpharma.com")
        );
        assert_eq!(
            extract_email("Electronic address: jane_doe+lab@mail.bio-corp.co.uk"),
            Some("jane_doe+lab@mail.bio-corp.co.uk")
        );
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            extract_email("first@a.com; second@b.org"),
            Some("first@a.com")
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_email("Dept of Biology, Stanford University"), None);
        assert_eq!(extract_email(""), None);
        // an '@' alone is not enough
        assert_eq!(extract_email("Contact @ front desk"), None);
        assert_eq!(extract_email("user@localhost"), None);
    }
}
