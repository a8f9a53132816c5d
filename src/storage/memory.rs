// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{KeyValueStore, StoreResult};

/// Process-local store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("offers").unwrap(), None);

        store.set("offers", "[]").unwrap();
        assert_eq!(store.get("offers").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("offers").unwrap());
        assert!(!store.remove("offers").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn set_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }
}
