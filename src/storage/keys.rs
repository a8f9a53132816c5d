// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fixed keys of the persisted layout.

/// JSON array of offers.
pub const OFFERS: &str = "offers";

/// JSON array of categories.
pub const CATEGORIES: &str = "categories";

/// Scratch key used by [`super::health_check`].
pub const HEALTH_CHECK: &str = "_health_check";

/// Whether `key` is safe to use as a file stem.
///
/// Only ASCII alphanumerics, `_` and `-` are allowed, so keys can never
/// escape the store directory or collide with temp files.
pub fn is_file_safe(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
