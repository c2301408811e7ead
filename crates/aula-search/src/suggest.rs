#![forbid(unsafe_code)]

//! The suggestion filter pipeline.
//!
//! Three gates in order: minimum query length, the grade-code
//! short-circuit, then normalized substring containment over the
//! roster. Matches keep roster order (no relevance re-ranking) and are
//! truncated to the configured limit.

use aula_model::UserRecord;

use crate::grade::GradePattern;
use crate::normalize::normalize;

/// Extracts the searchable display name from a record.
pub type DisplayNameFn = for<'a> fn(&'a UserRecord) -> &'a str;

/// Gates for the suggestion filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestConfig {
    /// Minimum trimmed query length, in characters, before any
    /// filtering happens.
    pub min_chars: usize,
    /// Maximum number of suggestions returned.
    pub limit: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            min_chars: 2,
            limit: 5,
        }
    }
}

/// Filter the roster against a query.
///
/// Returns the display names of matching records, in roster order,
/// at most `config.limit` of them. Empty when the trimmed query is
/// shorter than `config.min_chars` or is a grade-code token.
#[must_use]
pub fn suggest<'a>(
    query: &str,
    roster: &'a [UserRecord],
    pattern: &GradePattern,
    config: SuggestConfig,
    display_name: DisplayNameFn,
) -> Vec<&'a str> {
    let trimmed = query.trim();
    if trimmed.chars().count() < config.min_chars {
        return Vec::new();
    }
    if pattern.is_match(trimmed) {
        return Vec::new();
    }

    let needle = normalize(trimmed);
    roster
        .iter()
        .map(display_name)
        .filter(|name| normalize(name).contains(needle.as_ref()))
        .take(config.limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_model::{Staff, Student};

    fn student(name: &str) -> UserRecord {
        UserRecord::Student(Student {
            document_number: "70000001".into(),
            student_code: "S-001".into(),
            full_name: name.into(),
            grade: "5".into(),
            section: "A".into(),
            attendance_percentage: Some(90),
            tardiness_count: 0,
        })
    }

    fn staff(name: &str) -> UserRecord {
        UserRecord::Staff(Staff {
            dni: "40000001".into(),
            name: name.into(),
            area: None,
            role: None,
            attendance_percentage: None,
        })
    }

    fn roster() -> Vec<UserRecord> {
        vec![
            student("Alice Johnson"),
            student("Alícia Márquez"),
            staff("Albert Rivera"),
            student("María Torres"),
        ]
    }

    fn run(query: &str, roster: &[UserRecord], config: SuggestConfig) -> Vec<String> {
        suggest(
            query,
            roster,
            &GradePattern::default(),
            config,
            UserRecord::display_name,
        )
        .into_iter()
        .map(str::to_string)
        .collect()
    }

    #[test]
    fn short_queries_yield_nothing() {
        let roster = roster();
        assert!(run("", &roster, SuggestConfig::default()).is_empty());
        assert!(run("a", &roster, SuggestConfig::default()).is_empty());
        assert!(run(" a ", &roster, SuggestConfig::default()).is_empty());
    }

    #[test]
    fn grade_codes_suppress_suggestions_entirely() {
        let mut roster = roster();
        // Even a literally matching name stays hidden.
        roster.push(student("5A Something"));
        assert!(run("5A", &roster, SuggestConfig::default()).is_empty());
        assert!(run(" 5a ", &roster, SuggestConfig::default()).is_empty());
    }

    #[test]
    fn matching_is_accent_and_case_insensitive() {
        let names = run("ali", &roster(), SuggestConfig::default());
        assert_eq!(names, vec!["Alice Johnson", "Alícia Márquez"]);
        // Accented query finds the plain name too.
        let names = run("alí", &roster(), SuggestConfig::default());
        assert_eq!(names, vec!["Alice Johnson", "Alícia Márquez"]);
    }

    #[test]
    fn order_is_roster_order_not_relevance() {
        // "al" is a prefix of Albert but appears mid-word elsewhere;
        // roster order still wins.
        let names = run("al", &roster(), SuggestConfig::default());
        assert_eq!(names, vec!["Alice Johnson", "Alícia Márquez", "Albert Rivera"]);
    }

    #[test]
    fn limit_truncates() {
        let config = SuggestConfig {
            min_chars: 2,
            limit: 2,
        };
        let names = run("al", &roster(), config);
        assert_eq!(names.len(), 2);
        assert_eq!(names, vec!["Alice Johnson", "Alícia Márquez"]);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let config = SuggestConfig {
            min_chars: 2,
            limit: 0,
        };
        assert!(run("al", &roster(), config).is_empty());
    }

    #[test]
    fn query_is_trimmed_before_all_gates() {
        let names = run("  ali  ", &roster(), SuggestConfig::default());
        assert_eq!(names.len(), 2);
    }
}
