// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the key-value store.
//!
//! Each repository owns one collection stored as a JSON array under a fixed
//! key. Every call reads through to the store; nothing is cached. Mutations
//! read the whole collection, change it in memory, and write the whole
//! collection back.

pub mod categories;
pub mod offers;

pub use categories::{CategoryRepository, CategorySort, CategorySortField, SortDirection};
pub use offers::{OfferFilter, OfferRepository, OfferStatus};

use serde::{de::DeserializeOwned, Serialize};

use super::{KeyValueStore, StoreError, StoreResult};

/// Records addressed by a string id.
pub(crate) trait Entity {
    fn id(&self) -> &str;
}

/// Generate an id not already used in `items`.
pub(crate) fn fresh_id<T: Entity>(items: &[T]) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if items.iter().all(|item| item.id() != id) {
            return id;
        }
    }
}

/// A JSON array persisted under one key, with a seed fallback.
pub(crate) struct Collection<'a, T> {
    store: &'a dyn KeyValueStore,
    key: &'static str,
    seed: fn() -> Vec<T>,
}

impl<'a, T> Collection<'a, T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    pub(crate) fn new(store: &'a dyn KeyValueStore, key: &'static str, seed: fn() -> Vec<T>) -> Self {
        Self { store, key, seed }
    }

    /// Read the stored collection, or the seed if nothing is stored.
    ///
    /// The seed is never written back here.
    pub(crate) fn load(&self) -> StoreResult<Vec<T>> {
        match self.store.get(self.key)? {
            Some(raw) => {
                let items: Vec<T> =
                    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupted {
                        key: self.key.to_string(),
                        source,
                    })?;
                tracing::debug!(key = self.key, count = items.len(), "Loaded collection");
                Ok(items)
            }
            None => {
                tracing::debug!(key = self.key, "No stored collection, using seed");
                Ok((self.seed)())
            }
        }
    }

    /// Replace the stored collection.
    pub(crate) fn save(&self, items: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(self.key, &raw)
    }

    /// Append a record built from a freshly generated id.
    pub(crate) fn insert_with(&self, build: impl FnOnce(String) -> T) -> StoreResult<T>
    where
        T: Clone,
    {
        let mut items = self.load()?;
        let item = build(fresh_id(&items));
        items.push(item.clone());
        self.save(&items)?;
        Ok(item)
    }

    /// Drop the record with `id`. Writes only if something was removed.
    pub(crate) fn remove(&self, id: &str) -> StoreResult<bool> {
        let items = self.load()?;
        let before = items.len();
        let kept: Vec<T> = items.into_iter().filter(|item| item.id() != id).collect();

        if kept.len() == before {
            return Ok(false);
        }

        self.save(&kept)?;
        Ok(true)
    }

    /// Apply `change` to the record with `id`. Writes only if it was found.
    pub(crate) fn modify(&self, id: &str, change: impl FnOnce(&mut T)) -> StoreResult<bool> {
        let mut items = self.load()?;
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            return Ok(false);
        };

        change(item);
        self.save(&items)?;
        Ok(true)
    }

    pub(crate) fn find(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(self.load()?.into_iter().find(|item| item.id() == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    impl Entity for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn seed() -> Vec<Note> {
        vec![Note {
            id: "seed".to_string(),
            text: "hello".to_string(),
        }]
    }

    #[test]
    fn load_falls_back_to_seed_without_writing() {
        let store = MemoryStore::new();
        let notes = Collection::new(&store, "notes", seed);

        assert_eq!(notes.load().unwrap(), seed());
        assert!(store.is_empty());
    }

    #[test]
    fn insert_persists_seed_plus_new_record() {
        let store = MemoryStore::new();
        let notes = Collection::new(&store, "notes", seed);

        let added = notes
            .insert_with(|id| Note {
                id,
                text: "new".to_string(),
            })
            .unwrap();

        let stored = notes.load().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1], added);
        assert!(!added.id.is_empty());
    }

    #[test]
    fn remove_and_modify_report_absence() {
        let store = MemoryStore::new();
        let notes = Collection::new(&store, "notes", seed);

        assert!(!notes.remove("missing").unwrap());
        assert!(!notes.modify("missing", |n| n.text.clear()).unwrap());
        assert!(store.is_empty());

        assert!(notes.modify("seed", |n| n.text = "bye".to_string()).unwrap());
        assert_eq!(notes.find("seed").unwrap().unwrap().text, "bye");
    }

    #[test]
    fn corrupted_value_is_reported_with_key() {
        let store = MemoryStore::new();
        store.set("notes", "{definitely not an array").unwrap();
        let notes = Collection::new(&store, "notes", seed);

        let err = notes.load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { ref key, .. } if key == "notes"));
        assert!(err.is_unavailable());
    }

    #[test]
    fn fresh_id_avoids_existing_ids() {
        let notes = seed();
        let id = fresh_id(&notes);
        assert_ne!(id, "seed");
        assert_eq!(id.len(), 36);
    }
}
