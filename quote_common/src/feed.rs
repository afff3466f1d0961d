//! Wire format of the remote quote feed.
//!
//! The feed answers a POST with a JSON array of post-like items; only the
//! `title` field is consumed by the merge, the rest is carried for fidelity
//! with placeholder endpoints. The type is shared so the manager and the mock
//! feed server cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::keys::SERVER_CATEGORY;
use crate::quote::Quote;

/// One item of the remote feed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    /// Server-side identifier of the item.
    pub id: u64,
    /// Item title; becomes the quote text on merge.
    pub title: String,
    /// Item body; ignored by the merge.
    #[serde(default)]
    pub body: String,
}

impl FeedItem {
    /// Maps the item to a [`Quote`] with the fixed server category.
    pub fn to_quote(&self) -> Quote {
        Quote::new(&self.title, SERVER_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_maps_to_server_category_quote() {
        let item = FeedItem {
            id: 7,
            title: String::from("remote wisdom"),
            body: String::from("ignored"),
        };
        let quote = item.to_quote();
        assert_eq!(quote.text, "remote wisdom");
        assert_eq!(quote.category, SERVER_CATEGORY);
    }

    #[test]
    fn body_field_is_optional_on_decode() {
        let item: FeedItem = serde_json::from_str(r#"{"id":1,"title":"t"}"#).unwrap();
        assert_eq!(item.title, "t");
        assert!(item.body.is_empty());
    }
}
