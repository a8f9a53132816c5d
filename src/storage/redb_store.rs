// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded key-value store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `kv`: key → value (UTF-8 JSON text)

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::{KeyValueStore, StoreResult};

/// The only table: key → value.
const KV: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// redb-backed key-value store.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create the table so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV)?;
        match table.get(key)? {
            Some(value) => Ok(Some(value.value().to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(KV)?;
            let previous = table.remove(key)?;
            previous.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}
