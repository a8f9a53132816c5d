// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! [`StoreConfig`] loaded from them at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `OFFZONE_DATA_DIR` | Root directory for durable backends | `./data` |
//! | `OFFZONE_STORE` | Backend: `memory`, `files` or `redb` | `redb` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "OFFZONE_DATA_DIR";

/// Environment variable name for the storage backend.
pub const STORE_BACKEND_ENV: &str = "OFFZONE_STORE";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// File name of the redb database inside the data directory.
pub const REDB_FILE_NAME: &str = "offzone.redb";

/// Directory name of the file-per-key store inside the data directory.
pub const KV_DIR_NAME: &str = "kv";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown store backend {0:?} (expected memory, files or redb)")]
    UnknownBackend(String),

    #[error("unknown log format {0:?} (expected json or pretty)")]
    UnknownLogFormat(String),
}

/// Which key-value substrate backs the repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map; nothing survives a restart.
    Memory,
    /// One JSON file per key under `<data_dir>/kv/`.
    Files,
    /// Single redb database file at `<data_dir>/offzone.redb`.
    #[default]
    Redb,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "files" => Ok(StoreBackend::Files),
            "redb" => Ok(StoreBackend::Redb),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Files => write!(f, "files"),
            StoreBackend::Redb => write!(f, "redb"),
        }
    }
}

/// Log output format for [`crate::logging::init`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::UnknownLogFormat(s.to_string())),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(StoreBackend::default(), DEFAULT_DATA_DIR)
    }
}

impl StoreConfig {
    pub fn new(backend: StoreBackend, data_dir: impl AsRef<Path>) -> Self {
        Self {
            backend,
            data_dir: data_dir.as_ref().to_path_buf(),
            log_format: LogFormat::default(),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = match var(STORE_BACKEND_ENV) {
            Some(raw) => raw.parse()?,
            None => StoreBackend::default(),
        };
        let log_format = match var(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        let data_dir = var(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        Ok(Self {
            backend,
            data_dir: PathBuf::from(data_dir),
            log_format,
        })
    }

    /// Path to the redb database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(REDB_FILE_NAME)
    }

    /// Directory used by the file-per-key backend.
    pub fn kv_dir(&self) -> PathBuf {
        self.data_dir.join(KV_DIR_NAME)
    }
}
