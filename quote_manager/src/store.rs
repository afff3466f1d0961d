//! The quote store: an ordered sequence of quotes backed by durable storage.
//!
//! Every mutating operation writes the full sequence back to the durable
//! backend before returning, so the persisted state never lags the in-memory
//! state. The store also owns the session-scoped last-viewed pointer and the
//! persisted category filter.
//!
//! Category matching is case-insensitive everywhere (see
//! [`Quote::matches_category`]); the original data source was inconsistent
//! about this and the store settles on the user-friendly policy.

use chrono::Utc;
use log::{info, warn};
use quote_common::keys::{
    ALL_CATEGORIES, KEY_LAST_FILTER, KEY_LAST_SYNC_AT, KEY_LAST_VIEWED, KEY_QUOTES,
};
use quote_common::quote::seed_quotes;
use quote_common::{Quote, QuoteError, Result};
use rand::Rng;

use crate::storage::{KvStorage, SessionStorage};

/// Ordered quote sequence with write-through persistence.
pub struct QuoteStore<D: KvStorage> {
    quotes: Vec<Quote>,
    durable: D,
    session: SessionStorage,
}

impl<D: KvStorage> QuoteStore<D> {
    /// Loads the store from `durable`, seeding it with the default quotes
    /// (and persisting them immediately) when nothing is stored yet.
    ///
    /// Persisted entries that do not decode as a quote are dropped with a
    /// warning instead of propagating blanks into the sequence.
    pub fn load(durable: D, session: SessionStorage) -> Result<Self> {
        let mut store = Self {
            quotes: Vec::new(),
            durable,
            session,
        };

        match store.durable.get(KEY_QUOTES) {
            Some(raw) => {
                store.quotes = decode_entries(&raw);
                info!("Loaded {} quotes from storage", store.quotes.len());
            }
            None => {
                store.quotes = seed_quotes();
                store.save()?;
                info!("Storage empty, seeded {} default quotes", store.quotes.len());
            }
        }
        Ok(store)
    }

    /// Serializes the full sequence to durable storage.
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.quotes)?;
        self.durable.set(KEY_QUOTES, &json)
    }

    /// Appends a new quote and persists.
    ///
    /// Both fields are trimmed first; a blank text or category is rejected
    /// with a validation error and the store is left unchanged.
    pub fn add(&mut self, text: &str, category: &str) -> Result<()> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return Err(QuoteError::Validation(String::from(
                "Please enter both quote text and category.",
            )));
        }
        self.quotes.push(Quote::new(text, category));
        self.save()
    }

    /// Uniformly picks one quote matching `filter` and records it as the
    /// session's last-viewed quote. Returns `None` when nothing matches.
    pub fn pick_random(&mut self, filter: &str) -> Result<Option<Quote>> {
        let matching: Vec<usize> = self
            .quotes
            .iter()
            .enumerate()
            .filter(|(_, q)| q.matches_category(filter))
            .map(|(i, _)| i)
            .collect();

        if matching.is_empty() {
            return Ok(None);
        }

        let mut rng = rand::rng();
        let index = matching[rng.random_range(0..matching.len())];
        let quote = self.quotes[index].clone();
        let json = serde_json::to_string(&quote)?;
        self.session.set(KEY_LAST_VIEWED, &json)?;
        Ok(Some(quote))
    }

    /// Returns the quote last displayed during this session, if any.
    pub fn last_viewed(&self) -> Option<Quote> {
        let raw = self.session.get(KEY_LAST_VIEWED)?;
        serde_json::from_str(&raw).ok()
    }

    /// Appends every entry of a parsed JSON array and persists once.
    ///
    /// The value must be an array of well-formed quote objects, otherwise the
    /// import is rejected with no partial writes. Duplicates of existing
    /// quotes are appended as-is: import does not deduplicate.
    pub fn import_many(&mut self, value: serde_json::Value) -> Result<usize> {
        if !value.is_array() {
            return Err(QuoteError::Validation(String::from(
                "Import file must contain a JSON array of quotes.",
            )));
        }
        let imported: Vec<Quote> = serde_json::from_value(value)
            .map_err(|e| QuoteError::Validation(format!("Malformed quote in import: {}", e)))?;

        let count = imported.len();
        self.quotes.extend(imported);
        self.save()?;
        Ok(count)
    }

    /// Serializes the full sequence as pretty-printed (2-space indent) JSON.
    pub fn export_all(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.quotes)?;
        Ok(json)
    }

    /// Appends every quote of `batch` that is not already present, using
    /// structural equality (text AND category). Persists once if anything was
    /// appended and returns the appended count.
    pub fn merge_remote(&mut self, batch: &[Quote]) -> Result<usize> {
        let mut added = 0;
        for quote in batch {
            if !self.quotes.contains(quote) {
                self.quotes.push(quote.clone());
                added += 1;
            }
        }
        if added > 0 {
            self.save()?;
        }
        Ok(added)
    }

    /// Returns the persisted category filter, defaulting to the `all` sentinel.
    pub fn selected_filter(&self) -> String {
        self.durable
            .get(KEY_LAST_FILTER)
            .unwrap_or_else(|| String::from(ALL_CATEGORIES))
    }

    /// Persists `filter` as the selected category.
    pub fn set_selected_filter(&mut self, filter: &str) -> Result<()> {
        self.durable.set(KEY_LAST_FILTER, filter.trim())
    }

    /// Stamps the current UTC time as the last successful sync.
    pub fn record_sync_time(&mut self) -> Result<()> {
        self.durable.set(KEY_LAST_SYNC_AT, &Utc::now().to_rfc3339())
    }

    /// Returns the RFC 3339 time of the last successful sync, if any.
    pub fn last_sync_at(&self) -> Option<String> {
        self.durable.get(KEY_LAST_SYNC_AT)
    }

    /// All quotes in insertion order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }
}

/// Decodes a persisted JSON array leniently: entries that are not well-formed
/// quotes are dropped with a warning, a value that is not an array at all
/// falls back to the seed set.
fn decode_entries(raw: &str) -> Vec<Quote> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("Persisted quotes are not a JSON array ({}), reseeding", e);
            return seed_quotes();
        }
    };

    let total = values.len();
    let quotes: Vec<Quote> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<Quote>(v).ok())
        .collect();
    if quotes.len() < total {
        warn!("Dropped {} malformed quote entries on load", total - quotes.len());
    }
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_common::keys::SERVER_CATEGORY;
    use serde_json::json;

    fn fresh_store() -> QuoteStore<SessionStorage> {
        QuoteStore::load(SessionStorage::new(), SessionStorage::new()).unwrap()
    }

    #[test]
    fn empty_storage_is_seeded_and_persisted() {
        let mut durable = SessionStorage::new();
        durable.set("unrelated", "x").unwrap();
        let store = QuoteStore::load(durable, SessionStorage::new()).unwrap();
        assert_eq!(store.quotes().len(), 3);

        // The seed must have been written through immediately.
        let raw = store.durable.get(KEY_QUOTES).unwrap();
        let persisted: Vec<Quote> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, seed_quotes());
    }

    #[test]
    fn malformed_entries_are_dropped_on_load() {
        let mut durable = SessionStorage::new();
        durable
            .set(
                KEY_QUOTES,
                r#"[{"text":"ok","category":"Life"},{"nope":1},42]"#,
            )
            .unwrap();
        let store = QuoteStore::load(durable, SessionStorage::new()).unwrap();
        assert_eq!(store.quotes().len(), 1);
        assert_eq!(store.quotes()[0].text, "ok");
    }

    #[test]
    fn add_appends_exactly_one_at_the_end() {
        let mut store = fresh_store();
        store.add("Test", "QA").unwrap();
        assert_eq!(store.quotes().len(), 4);
        assert_eq!(*store.quotes().last().unwrap(), Quote::new("Test", "QA"));
    }

    #[test]
    fn add_rejects_blank_fields_without_state_change() {
        let mut store = fresh_store();
        assert!(matches!(
            store.add("   ", "QA"),
            Err(QuoteError::Validation(_))
        ));
        assert!(matches!(
            store.add("text", "  \t"),
            Err(QuoteError::Validation(_))
        ));
        assert_eq!(store.quotes().len(), 3);
    }

    #[test]
    fn pick_random_honors_filter_case_insensitively() {
        let mut store = fresh_store();
        store.add("Test", "QA").unwrap();
        for _ in 0..20 {
            let quote = store.pick_random("qa").unwrap().unwrap();
            assert_eq!(quote, Quote::new("Test", "QA"));
        }
    }

    #[test]
    fn pick_random_on_empty_filtered_set_returns_none() {
        let mut store = fresh_store();
        assert!(store.pick_random("NoSuchCategory").unwrap().is_none());
    }

    #[test]
    fn pick_random_records_last_viewed() {
        let mut store = fresh_store();
        store.add("Test", "QA").unwrap();
        assert!(store.last_viewed().is_none());
        store.pick_random("QA").unwrap();
        assert_eq!(store.last_viewed(), Some(Quote::new("Test", "QA")));
    }

    #[test]
    fn import_rejects_non_array_without_state_change() {
        let mut store = fresh_store();
        let err = store.import_many(json!({"text": "x", "category": "y"}));
        assert!(matches!(err, Err(QuoteError::Validation(_))));
        assert_eq!(store.quotes().len(), 3);
    }

    #[test]
    fn import_appends_all_entries_including_duplicates() {
        let mut store = fresh_store();
        let existing = store.quotes()[0].clone();
        let batch = json!([
            {"text": existing.text, "category": existing.category},
            {"text": "fresh", "category": "New"},
        ]);
        let count = store.import_many(batch).unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.quotes().len(), 5);
    }

    #[test]
    fn merge_skips_structurally_equal_quotes() {
        let mut store = fresh_store();
        let existing = store.quotes()[0].clone();
        let batch = vec![existing, Quote::new("brand new", SERVER_CATEGORY)];
        let added = store.merge_remote(&batch).unwrap();
        assert_eq!(added, 1);
        assert_eq!(store.quotes().len(), 4);
    }

    #[test]
    fn merge_with_nothing_new_adds_nothing() {
        let mut store = fresh_store();
        let batch: Vec<Quote> = store.quotes().to_vec();
        assert_eq!(store.merge_remote(&batch).unwrap(), 0);
        assert_eq!(store.quotes().len(), 3);
    }

    #[test]
    fn export_then_import_duplicates_the_sequence_in_order() {
        let mut store = fresh_store();
        let exported = store.export_all().unwrap();
        let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
        let count = store.import_many(value).unwrap();
        assert_eq!(count, 3);
        assert_eq!(store.quotes().len(), 6);
        assert_eq!(store.quotes()[..3], store.quotes()[3..]);
    }

    #[test]
    fn export_is_pretty_printed() {
        let store = fresh_store();
        let exported = store.export_all().unwrap();
        assert!(exported.starts_with("[\n"));
        assert!(exported.contains("  {"));
    }

    #[test]
    fn selected_filter_defaults_to_all_and_persists() {
        let mut store = fresh_store();
        assert_eq!(store.selected_filter(), ALL_CATEGORIES);
        store.set_selected_filter("Life").unwrap();
        assert_eq!(store.selected_filter(), "Life");
    }
}
