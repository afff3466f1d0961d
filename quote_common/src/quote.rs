//! Quote data model and JSON encoding helpers.
//!
//! A `Quote` is the record managed by the store and exchanged with the feed.
//! It has no identifier: two quotes are the same quote exactly when both the
//! text and the category match, and deduplication everywhere relies on that
//! derived structural equality.

use serde::{Deserialize, Serialize};

use crate::keys::ALL_CATEGORIES;

/// A single quote record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    /// The quote text.
    pub text: String,
    /// Free-form category label (e.g., `Inspiration`).
    pub category: String,
}

impl Quote {
    /// Creates a new quote from the given parts.
    pub fn new(text: &str, category: &str) -> Self {
        Quote {
            text: String::from(text),
            category: String::from(category),
        }
    }

    /// Returns `true` if this quote belongs to `filter`.
    ///
    /// Matching is case-insensitive; the `all` sentinel (or an empty filter)
    /// matches every quote.
    pub fn matches_category(&self, filter: &str) -> bool {
        let filter = filter.trim();
        if filter.is_empty() || filter.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return true;
        }
        self.category.eq_ignore_ascii_case(filter)
    }
}

/// The default quotes used to initialize an empty store.
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only way to do great work is to love what you do.",
            "Inspiration",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        Quote::new("Do or do not. There is no try.", "Motivation"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality_requires_both_fields() {
        let a = Quote::new("same text", "Life");
        let b = Quote::new("same text", "Life");
        let c = Quote::new("same text", "Work");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn category_match_is_case_insensitive() {
        let q = Quote::new("x", "Inspiration");
        assert!(q.matches_category("inspiration"));
        assert!(q.matches_category("INSPIRATION"));
        assert!(!q.matches_category("life"));
    }

    #[test]
    fn all_sentinel_and_empty_filter_match_everything() {
        let q = Quote::new("x", "Life");
        assert!(q.matches_category("all"));
        assert!(q.matches_category("All"));
        assert!(q.matches_category(""));
        assert!(q.matches_category("  "));
    }

    #[test]
    fn seed_set_has_three_quotes() {
        let seed = seed_quotes();
        assert_eq!(seed.len(), 3);
        assert_eq!(seed[2].category, "Motivation");
    }
}
