#![forbid(unsafe_code)]

//! Committed search filter tokens.

/// How a committed tag should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Free-text token matched against display names.
    Keyword,
    /// A grade-section code such as `"5A"`, matched structurally.
    Grade,
}

/// A committed search filter, shown as a removable chip.
///
/// Tags are owned by the controller that owns the search box. The
/// search component only ever requests add/remove; in particular
/// `is_valid` is computed by the owner (e.g. "does any student actually
/// belong to 5A"), never by the search component, and duplicate tags
/// are the owner's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTag {
    /// The raw committed value, used for removal identity.
    pub value: String,
    /// What the chip displays (e.g. canonical `"5A"` for a grade tag).
    pub display_value: String,
    /// Interpretation of the token.
    pub kind: TagKind,
    /// Owner-computed validity; invalid tags render visibly distinct.
    pub is_valid: bool,
}

impl SearchTag {
    /// A keyword tag; display equals the raw value.
    #[must_use]
    pub fn keyword(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            display_value: value.clone(),
            value,
            kind: TagKind::Keyword,
            is_valid: true,
        }
    }

    /// A grade tag with a canonical display form.
    #[must_use]
    pub fn grade(value: impl Into<String>, display_value: impl Into<String>, is_valid: bool) -> Self {
        Self {
            value: value.into(),
            display_value: display_value.into(),
            kind: TagKind::Grade,
            is_valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_tag_is_valid_and_mirrors_value() {
        let tag = SearchTag::keyword("Maria");
        assert_eq!(tag.kind, TagKind::Keyword);
        assert_eq!(tag.value, "Maria");
        assert_eq!(tag.display_value, "Maria");
        assert!(tag.is_valid);
    }

    #[test]
    fn grade_tag_keeps_raw_value_and_canonical_display() {
        let tag = SearchTag::grade("5 a", "5A", false);
        assert_eq!(tag.kind, TagKind::Grade);
        assert_eq!(tag.value, "5 a");
        assert_eq!(tag.display_value, "5A");
        assert!(!tag.is_valid);
    }
}
