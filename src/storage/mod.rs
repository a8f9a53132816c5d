// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Key-Value Storage Module
//!
//! Repositories persist through the [`KeyValueStore`] trait: a flat map of
//! string keys to string values, the same shape as browser local storage.
//! Three substrates implement it:
//!
//! - [`MemoryStore`]: process-local map, used by tests and ephemeral hosts
//! - [`FileStore`]: one JSON file per key, replaced atomically via rename
//! - [`RedbStore`]: single embedded redb database (ACID)
//!
//! ## Storage Layout
//!
//! ```text
//! offers       -> JSON array of Offer
//! categories   -> JSON array of Category
//! ```
//!
//! ## Important Notes
//!
//! - Values are stored whole. Repositories read and rewrite the entire
//!   collection on every mutation; there is no partial update.
//! - Concurrent writers are last-write-wins per key. Nothing here
//!   coordinates multiple processes.

pub mod file_store;
pub mod keys;
pub mod memory;
pub mod redb_store;
pub mod repository;

pub use crate::error::{StoreError, StoreResult};
pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;
pub use repository::{
    CategoryRepository, CategorySort, CategorySortField, OfferFilter, OfferRepository,
    OfferStatus, SortDirection,
};

use crate::config::{StoreBackend, StoreConfig};

/// Synchronous string key-value store.
///
/// Methods take `&self`; implementations lock internally so a store can be
/// shared between repositories.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Returns whether a value was present.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        (**self).contains(key)
    }
}

/// Open the backend selected by `config`.
pub fn open_store(config: &StoreConfig) -> StoreResult<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match config.backend {
        StoreBackend::Memory => Box::new(MemoryStore::new()),
        StoreBackend::Files => Box::new(FileStore::open(config.kv_dir())?),
        StoreBackend::Redb => Box::new(RedbStore::open(&config.db_path())?),
    };

    tracing::info!(
        backend = %config.backend,
        data_dir = %config.data_dir.display(),
        "Opened key-value store"
    );
    Ok(store)
}

/// Check that the store is usable.
///
/// Performs a write-read-remove round trip on a scratch key. Callers can run
/// this at startup to surface "persistence unavailable" before the first
/// repository call.
pub fn health_check(store: &dyn KeyValueStore) -> StoreResult<()> {
    let marker = "ok";

    store.set(keys::HEALTH_CHECK, marker)?;
    let read = store.get(keys::HEALTH_CHECK)?;
    store.remove(keys::HEALTH_CHECK)?;

    if read.as_deref() != Some(marker) {
        return Err(StoreError::Io(std::io::Error::other(
            "health check data mismatch",
        )));
    }

    Ok(())
}
