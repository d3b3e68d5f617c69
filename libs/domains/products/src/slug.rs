//! Canonical slug derivation.

/// Lower-case, spaces to `_`, apostrophes dropped, in that order.
///
/// ```
/// use domain_products::slug::normalize_slug;
///
/// assert_eq!(normalize_slug("Men's Chill Sweatshirt"), "mens_chill_sweatshirt");
/// ```
pub fn normalize_slug(candidate: &str) -> String {
    candidate.to_lowercase().replace(' ', "_").replace('\'', "")
}

/// Normalized `candidate`, or `None` when nothing survives normalization.
pub fn non_empty_slug(candidate: &str) -> Option<String> {
    Some(normalize_slug(candidate)).filter(|slug| !slug.is_empty())
}

/// Slug for a new product: the supplied slug, or the title when the supplied
/// one is absent or normalizes to nothing. `None` when both are empty.
pub fn slug_for_insert(title: &str, slug: Option<&str>) -> Option<String> {
    slug.and_then(non_empty_slug).or_else(|| non_empty_slug(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_then_replaces_spaces_then_drops_apostrophes() {
        assert_eq!(normalize_slug("Men's Chill Sweatshirt"), "mens_chill_sweatshirt");
        assert_eq!(normalize_slug("KIDS CYBERTRUCK TEE"), "kids_cybertruck_tee");
    }

    #[test]
    fn test_is_idempotent() {
        for title in ["Women's  Raven Slouchy Tee", "already_a_slug", "'quoted' title", ""] {
            let once = normalize_slug(title);
            assert_eq!(normalize_slug(&once), once);
            assert!(!once.contains(' '));
            assert!(!once.contains('\''));
            assert_eq!(once, once.to_lowercase());
        }
    }

    #[test]
    fn test_consecutive_spaces_each_become_underscore() {
        assert_eq!(normalize_slug("a  b"), "a__b");
    }

    #[test]
    fn test_insert_falls_back_to_title() {
        assert_eq!(slug_for_insert("Cyber Hoodie", None).unwrap(), "cyber_hoodie");
        assert_eq!(slug_for_insert("Cyber Hoodie", Some("")).unwrap(), "cyber_hoodie");
        assert_eq!(slug_for_insert("Cyber Hoodie", Some("''")).unwrap(), "cyber_hoodie");
        assert_eq!(slug_for_insert("Cyber Hoodie", Some("My Hoodie")).unwrap(), "my_hoodie");
    }

    #[test]
    fn test_insert_rejects_apostrophe_only_input() {
        assert_eq!(non_empty_slug("'''"), None);
        assert_eq!(slug_for_insert("'", None), None);
        assert_eq!(slug_for_insert("'", Some("''")), None);
        assert_eq!(slug_for_insert("'", Some("Kid's")).unwrap(), "kids");
    }
}
