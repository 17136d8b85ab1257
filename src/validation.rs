//! Lead input validation.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Longest address accepted, in UTF-16 code units (what a browser's `value.length` reports).
pub const MAX_EMAIL_LENGTH: usize = 320;

// local@domain.tld, no whitespace and a single '@'
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Returns true if `email` has a `local@domain.tld` shape and is at most 320 characters.
///
/// Deliberately shallow: no internationalization rules, no MX or DNS lookup.
pub fn is_valid_email(email: &str) -> bool {
    if email.encode_utf16().count() > MAX_EMAIL_LENGTH {
        return false;
    }
    EMAIL_REGEX.is_match(email)
}

/// Extracts a valid email from an untyped JSON field.
///
/// Non-string values (numbers, arrays, `null`, ...) are rejected without error.
pub fn email_field(value: &Value) -> Option<&str> {
    value.as_str().filter(|email| is_valid_email(email))
}

/// Consent only counts when it is the JSON literal `true`.
pub fn has_consent(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co.uk"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@examplecom"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("user @example.com"));
        assert!(!is_valid_email("user@exam ple.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email(" user@example.com"));
    }

    #[test]
    fn test_length_limit() {
        let domain = "@example.com";
        let at_limit = format!("{}{}", "a".repeat(MAX_EMAIL_LENGTH - domain.len()), domain);
        assert_eq!(at_limit.len(), MAX_EMAIL_LENGTH);
        assert!(is_valid_email(&at_limit));

        let over_limit = format!("a{}", at_limit);
        assert!(!is_valid_email(&over_limit));
    }

    #[test]
    fn test_email_field_rejects_non_strings() {
        assert_eq!(email_field(&json!("user@example.com")), Some("user@example.com"));
        assert_eq!(email_field(&json!(42)), None);
        assert_eq!(email_field(&json!(null)), None);
        assert_eq!(email_field(&json!(["user@example.com"])), None);
        assert_eq!(email_field(&json!({"email": "user@example.com"})), None);
    }

    #[test]
    fn test_consent_must_be_literal_true() {
        assert!(has_consent(&json!(true)));
        assert!(!has_consent(&json!(false)));
        assert!(!has_consent(&json!("true")));
        assert!(!has_consent(&json!(1)));
        assert!(!has_consent(&json!(null)));
    }
}
