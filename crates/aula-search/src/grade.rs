#![forbid(unsafe_code)]

//! The reserved grade-code token format.
//!
//! A query that looks like a grade-section code ("5A", "12 b") is never
//! searched against the name index: suggestions are suppressed and the
//! owner is expected to commit it as a grade filter tag. This is a
//! deliberate short-circuit, not a missed lookup.

use regex::{Regex, RegexBuilder};

/// Default token format: one or two digits, an optional single space,
/// one section letter A–F. Matched case-insensitively.
pub const DEFAULT_GRADE_PATTERN: &str = r"^\d{1,2}\s?[A-F]$";

/// Compiled grade-code recognizer.
///
/// Construction is the only fallible step; a malformed custom pattern
/// errors here, never at keystroke time.
#[derive(Debug, Clone)]
pub struct GradePattern {
    regex: Regex,
}

impl GradePattern {
    /// Compile a custom pattern. Matching is case-insensitive, mirroring
    /// the default's behavior.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    /// Whether a trimmed query is a grade-code token.
    #[must_use]
    pub fn is_match(&self, trimmed: &str) -> bool {
        self.regex.is_match(trimmed)
    }

    /// Canonical display form of a token: uppercased, whitespace
    /// removed. `"5 a"` becomes `"5A"`.
    #[must_use]
    pub fn canonical(&self, token: &str) -> String {
        token
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl Default for GradePattern {
    fn default() -> Self {
        Self::new(DEFAULT_GRADE_PATTERN).expect("default grade pattern is a valid regex")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_grade_codes() {
        let pattern = GradePattern::default();
        assert!(pattern.is_match("5A"));
        assert!(pattern.is_match("5a"));
        assert!(pattern.is_match("12F"));
        assert!(pattern.is_match("5 A"));
    }

    #[test]
    fn default_rejects_non_codes() {
        let pattern = GradePattern::default();
        assert!(!pattern.is_match("Maria"));
        assert!(!pattern.is_match("123A"));
        assert!(!pattern.is_match("5G"));
        assert!(!pattern.is_match("5A extra"));
        assert!(!pattern.is_match(""));
    }

    #[test]
    fn custom_pattern_is_case_insensitive_too() {
        let pattern = GradePattern::new(r"^sec-[a-z]$").expect("valid pattern");
        assert!(pattern.is_match("SEC-B"));
        assert!(!pattern.is_match("sec-3"));
    }

    #[test]
    fn malformed_pattern_fails_at_construction() {
        assert!(GradePattern::new(r"^\d{1,2[A-F]$").is_err());
    }

    #[test]
    fn canonical_uppercases_and_strips_space() {
        let pattern = GradePattern::default();
        assert_eq!(pattern.canonical("5 a"), "5A");
        assert_eq!(pattern.canonical("12f"), "12F");
        assert_eq!(pattern.canonical("5A"), "5A");
    }
}
