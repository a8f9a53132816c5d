// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OffZone Store - offer and category repository
//!
//! This crate owns the authoritative offer and category collections of the
//! OffZone deals marketplace. Collections are persisted as JSON arrays in a
//! key-value store injected into each repository, so hosts can pick a
//! durable backend and tests can use an in-memory one.
//!
//! ## Modules
//!
//! - `config` - Environment-driven store and logging configuration
//! - `error` - Store and validation error types
//! - `image` - Inline `data:` URL encoding for offer pictures
//! - `logging` - Tracing subscriber setup
//! - `models` - Offer and category records
//! - `seed` - Sample collections returned before the first write
//! - `storage` - Key-value backends and repositories
//!
//! ## Example
//!
//! ```rust,ignore
//! let store = MemoryStore::new();
//! let offers = OfferRepository::new(&store);
//! let added = offers.add(NewOffer::new("Test", "Test offer", "T1", 10, valid_until))?;
//! assert!(offers.delete(&added.id)?);
//! ```

pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod models;
pub mod seed;
pub mod storage;

pub use config::{ConfigError, LogFormat, StoreBackend, StoreConfig};
pub use error::{StoreError, StoreResult, ValidationError};
pub use models::{BuiltinIcon, Category, CategoryIcon, CategoryPatch, NewCategory, NewOffer, Offer};
pub use storage::{
    open_store, CategoryRepository, FileStore, KeyValueStore, MemoryStore, OfferRepository,
    RedbStore,
};
