// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Category repository.
//!
//! Categories are stored as one JSON array under the `categories` key.
//! Deleting a category never touches offers that carry its name.

use std::cmp::Ordering;

use super::super::{keys, KeyValueStore, StoreResult};
use super::{Collection, Entity};
use crate::models::{Category, CategoryPatch, NewCategory};
use crate::seed;

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategorySortField {
    #[default]
    Name,
    Id,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Ordering for [`CategoryRepository::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySort {
    pub field: CategorySortField,
    pub direction: SortDirection,
}

impl CategorySort {
    pub fn new(field: CategorySortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    fn compare(&self, a: &Category, b: &Category) -> Ordering {
        let ordering = match self.field {
            CategorySortField::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            CategorySortField::Id => a.id.cmp(&b.id),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Repository for category operations.
pub struct CategoryRepository<'a> {
    categories: Collection<'a, Category>,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new CategoryRepository over `store`.
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            categories: Collection::new(store, keys::CATEGORIES, seed::categories),
        }
    }

    /// All categories in stored order, or the seed if none are stored.
    pub fn get_all(&self) -> StoreResult<Vec<Category>> {
        self.categories.load()
    }

    /// Store a new category and return it with its assigned id.
    pub fn add(&self, category: NewCategory) -> StoreResult<Category> {
        let category = self
            .categories
            .insert_with(|id| category.into_category(id))?;
        tracing::info!(category_id = %category.id, name = %category.name, "Category added");
        Ok(category)
    }

    /// Delete a category. Returns `false` if no category has this id.
    pub fn delete(&self, category_id: &str) -> StoreResult<bool> {
        let removed = self.categories.remove(category_id)?;
        if removed {
            tracing::info!(category_id, "Category deleted");
        } else {
            tracing::warn!(category_id, "Delete requested for unknown category");
        }
        Ok(removed)
    }

    /// Merge `patch` into the category. Returns `false` if no category has
    /// this id, in which case nothing is written.
    pub fn update(&self, category_id: &str, patch: CategoryPatch) -> StoreResult<bool> {
        let updated = self
            .categories
            .modify(category_id, |category| patch.apply_to(category))?;
        if updated {
            tracing::info!(category_id, "Category updated");
        } else {
            tracing::warn!(category_id, "Update requested for unknown category");
        }
        Ok(updated)
    }

    pub fn find_by_id(&self, category_id: &str) -> StoreResult<Option<Category>> {
        self.categories.find(category_id)
    }

    /// Categories whose name contains `query` (case-insensitive), sorted.
    pub fn search(&self, query: &str, sort: CategorySort) -> StoreResult<Vec<Category>> {
        let needle = query.trim().to_lowercase();
        let mut categories: Vec<Category> = self
            .get_all()?
            .into_iter()
            .filter(|category| category.name.to_lowercase().contains(&needle))
            .collect();
        categories.sort_by(|a, b| sort.compare(a, b));
        Ok(categories)
    }
}
