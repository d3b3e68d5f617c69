//! Classification of a search term into an id lookup or a title/slug lookup.

use std::fmt;
use uuid::Uuid;

/// Which key a lookup used, reported in `NotFound` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKey {
    Id,
    Slug,
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id => write!(f, "id"),
            LookupKey::Slug => write!(f, "slug"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTerm<'a> {
    Id(Uuid),
    TitleOrSlug(&'a str),
}

impl<'a> SearchTerm<'a> {
    /// Only the hyphenated 36-character form counts as an id; anything else is a title or slug.
    pub fn classify(term: &'a str) -> Self {
        if term.len() == 36 {
            if let Ok(id) = Uuid::try_parse(term) {
                return SearchTerm::Id(id);
            }
        }
        SearchTerm::TitleOrSlug(term)
    }

    pub fn key(&self) -> LookupKey {
        match self {
            SearchTerm::Id(_) => LookupKey::Id,
            SearchTerm::TitleOrSlug(_) => LookupKey::Slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenated_uuid_is_id() {
        let id = Uuid::new_v4();
        let term = id.to_string();
        assert_eq!(SearchTerm::classify(&term), SearchTerm::Id(id));
        assert_eq!(SearchTerm::classify(&term).key(), LookupKey::Id);
    }

    #[test]
    fn test_uppercase_uuid_is_id() {
        let id = Uuid::new_v4();
        let term = id.to_string().to_uppercase();
        assert_eq!(SearchTerm::classify(&term), SearchTerm::Id(id));
    }

    #[test]
    fn test_simple_uuid_form_is_slug() {
        let term = Uuid::new_v4().simple().to_string();
        assert_eq!(SearchTerm::classify(&term).key(), LookupKey::Slug);
    }

    #[test]
    fn test_plain_text_is_slug() {
        assert_eq!(
            SearchTerm::classify("mens_chill_sweatshirt"),
            SearchTerm::TitleOrSlug("mens_chill_sweatshirt")
        );
    }

    #[test]
    fn test_36_chars_that_are_not_uuid_is_slug() {
        let term = "x".repeat(36);
        assert_eq!(SearchTerm::classify(&term).key(), LookupKey::Slug);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(LookupKey::Id.to_string(), "id");
        assert_eq!(LookupKey::Slug.to_string(), "slug");
    }
}
