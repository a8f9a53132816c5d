// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File-per-key store.
//!
//! Each key lives in `<root>/<key>.json`. Every write goes to its own
//! uniquely named temp file in `<root>` and is moved into place with
//! `rename`, so a reader sees either the old or the new value, never a torn
//! one, even with several writers on the same directory. A failed write
//! removes its temp file.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::keys::is_file_safe;
use super::{KeyValueStore, StoreError, StoreResult};

/// Directory-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        if !is_file_safe(key) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;

        // Same directory as the target so the rename never crosses filesystems
        let temp = NamedTempFile::new_in(&self.root)?;
        let mut writer = BufWriter::new(temp);
        writer.write_all(value.as_bytes())?;
        let temp = writer.into_inner().map_err(|e| e.into_error())?;
        temp.as_file().sync_all()?;

        temp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
