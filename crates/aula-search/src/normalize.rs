#![forbid(unsafe_code)]

//! Text normalization for accent/case-insensitive comparison.
//!
//! Both the query and every candidate display name pass through
//! [`normalize`] before substring matching, so "alicia" finds
//! "Alícia". Highlighting deliberately does NOT use this (see
//! [`crate::highlight`]).

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercase a string and strip combining diacritical marks.
///
/// Applies NFD decomposition so precomposed characters like U+00ED
/// (i-acute) split into their base letter plus a combining mark, then
/// drops the marks and lowercases what remains. Total: empty in, empty
/// out; never fails.
///
/// ASCII input that is already lowercase is returned borrowed.
#[must_use]
pub fn normalize(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Owned(s.to_ascii_lowercase());
        }
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lowercases_ascii() {
        assert_eq!(normalize("Maria"), "maria");
        assert_eq!(normalize("MARIA"), "maria");
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(normalize("Alícia"), "alicia");
        assert_eq!(normalize("Márquez"), "marquez");
        assert_eq!(normalize("ñandú"), "nandu");
    }

    #[test]
    fn accented_and_plain_collapse_to_the_same_key() {
        assert_eq!(normalize("Alícia"), normalize("alicia"));
        assert_eq!(normalize("café"), normalize("CAFE"));
    }

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn lowercase_ascii_borrows() {
        assert!(matches!(normalize("alicia"), Cow::Borrowed(_)));
        assert!(matches!(normalize("Alicia"), Cow::Owned(_)));
    }

    #[test]
    fn combining_mark_input_matches_precomposed() {
        // "Ali\u{0301}cia": explicit combining acute over the i.
        assert_eq!(normalize("Ali\u{0301}cia"), "alicia");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "\\PC{0,40}") {
            let once = normalize(&s).into_owned();
            let twice = normalize(&once).into_owned();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_never_yields_uppercase_ascii(s in "\\PC{0,40}") {
            let out = normalize(&s).into_owned();
            prop_assert!(!out.bytes().any(|b| b.is_ascii_uppercase()));
        }
    }
}
