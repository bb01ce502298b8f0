//! In-memory storage backend

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::store::StoragePort;

/// HashMap-backed [`StoragePort`], used in tests and as the api's
/// volatile store. An optional per-entry quota lets tests exercise the
/// storage-full path.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    entry_quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store with no quota
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store rejecting entries above `quota` characters
    #[must_use]
    pub fn with_entry_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            entry_quota: Some(quota),
        }
    }

    /// Number of entries currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry exists under `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl StoragePort for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.entry_quota {
            let length = value.chars().count();
            if length > quota {
                return Err(Error::StorageCapacity {
                    key: key.to_string(),
                    detail: format!("entry of {length} characters exceeds quota of {quota}"),
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
