// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error types shared by the storage backends and repositories.
//!
//! "Not found" is never an error in this crate: repositories answer with
//! `false` or `None`. Everything that reaches [`StoreError`] means the
//! persistence substrate could not be used.

/// Error type for key-value store and repository operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    /// The value stored under `key` is not a valid JSON collection.
    #[error("corrupted value under key `{key}`: {source}")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key cannot be represented by the backend (e.g. unsafe file name).
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl StoreError {
    /// Whether this error means the persistence layer is unusable.
    ///
    /// UI callers only need this one signal to show a generic failure
    /// message. `InvalidKey` is a caller bug rather than a storage fault.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, StoreError::InvalidKey(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-side validation failures for new offers and categories.
///
/// The repository itself never validates; forms call `validate()` before
/// handing data over.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("discount must be between 1 and 100, got {0}")]
    DiscountOutOfRange(u8),

    #[error("category name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("deal URL is not an absolute http(s) link: {0}")]
    InvalidDealUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_failures_are_unavailable() {
        let io = StoreError::from(std::io::Error::other("disk gone"));
        assert!(io.is_unavailable());

        let source = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let corrupted = StoreError::Corrupted {
            key: "offers".to_string(),
            source,
        };
        assert!(corrupted.is_unavailable());
        assert!(corrupted.to_string().contains("`offers`"));
    }

    #[test]
    fn invalid_key_is_not_unavailable() {
        let err = StoreError::InvalidKey("../etc".to_string());
        assert!(!err.is_unavailable());
    }

    #[test]
    fn validation_messages() {
        assert_eq!(
            ValidationError::Blank("title").to_string(),
            "title must not be blank"
        );
        assert_eq!(
            ValidationError::DiscountOutOfRange(0).to_string(),
            "discount must be between 1 and 100, got 0"
        );
    }
}
