//! Key-value storage backends for the quote store.
//!
//! Two implementations of the same small trait:
//! - `DurableStorage` — one file per key under a data directory, written
//!   through immediately on every `set` so the on-disk state never lags the
//!   in-memory state.
//! - `SessionStorage` — an in-memory map that lives exactly as long as the
//!   process, the native analog of tab-scoped session storage.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use quote_common::{QuoteError, Result};

/// String key-value storage seam shared by the durable and session backends.
pub trait KvStorage {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage surviving across sessions.
pub struct DurableStorage {
    dir: PathBuf,
}

impl DurableStorage {
    /// Opens (and creates if needed) the storage directory at `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KvStorage for DurableStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        fs::write(&path, value).map_err(QuoteError::Io)?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// In-memory storage scoped to the current process.
#[derive(Default)]
pub struct SessionStorage {
    values: HashMap<String, String>,
}

impl SessionStorage {
    /// Creates an empty session store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStorage for SessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(String::from(key), String::from(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn durable_storage_round_trips_values() {
        let dir = tempdir().unwrap();
        let mut storage = DurableStorage::open(dir.path()).unwrap();
        assert!(storage.get("quotes").is_none());

        storage.set("quotes", "[1,2,3]").unwrap();
        assert_eq!(storage.get("quotes").as_deref(), Some("[1,2,3]"));

        storage.set("quotes", "[]").unwrap();
        assert_eq!(storage.get("quotes").as_deref(), Some("[]"));
    }

    #[test]
    fn durable_storage_persists_across_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut storage = DurableStorage::open(dir.path()).unwrap();
            storage.set("lastSelectedFilter", "Life").unwrap();
        }
        let storage = DurableStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get("lastSelectedFilter").as_deref(), Some("Life"));
    }

    #[test]
    fn session_storage_overwrites_and_reads_back() {
        let mut storage = SessionStorage::new();
        assert!(storage.get("lastViewedQuote").is_none());
        storage.set("lastViewedQuote", "a").unwrap();
        storage.set("lastViewedQuote", "b").unwrap();
        assert_eq!(storage.get("lastViewedQuote").as_deref(), Some("b"));
    }
}
