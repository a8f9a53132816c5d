// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Offer repository.
//!
//! Offers are stored as one JSON array under the `offers` key. There is no
//! update operation: the admin area edits an offer by deleting it and
//! adding the changed copy.

use chrono::NaiveDate;

use super::super::{keys, KeyValueStore, StoreResult};
use super::{Collection, Entity};
use crate::models::{NewOffer, Offer};
use crate::seed;

impl Entity for Offer {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Expiry filter for [`OfferFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OfferStatus {
    #[default]
    All,
    Active,
    Expired,
}

/// In-memory filter over the offer collection.
///
/// Mirrors the admin listing: free-text search on title or description,
/// an exact category label, and an expiry status relative to `today`.
#[derive(Debug, Clone)]
pub struct OfferFilter {
    pub today: NaiveDate,
    pub query: Option<String>,
    pub category: Option<String>,
    pub status: OfferStatus,
    pub featured_only: bool,
}

impl OfferFilter {
    /// Filter matching every offer, with expiry evaluated against `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            query: None,
            category: None,
            status: OfferStatus::All,
            featured_only: false,
        }
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: OfferStatus) -> Self {
        self.status = status;
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn matches(&self, offer: &Offer) -> bool {
        if let Some(query) = self.query.as_deref().map(str::trim) {
            let needle = query.to_lowercase();
            if !offer.title.to_lowercase().contains(&needle)
                && !offer.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if offer.category.as_ref() != Some(category) {
                return false;
            }
        }

        if self.featured_only && !offer.is_featured {
            return false;
        }

        match self.status {
            OfferStatus::All => true,
            OfferStatus::Active => !offer.is_expired(self.today),
            OfferStatus::Expired => offer.is_expired(self.today),
        }
    }
}

/// Repository for offer operations.
pub struct OfferRepository<'a> {
    offers: Collection<'a, Offer>,
}

impl<'a> OfferRepository<'a> {
    /// Create a new OfferRepository over `store`.
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            offers: Collection::new(store, keys::OFFERS, seed::offers),
        }
    }

    /// All offers in stored order, or the seed if none are stored.
    pub fn get_all(&self) -> StoreResult<Vec<Offer>> {
        self.offers.load()
    }

    /// Store a new offer and return it with its assigned id.
    pub fn add(&self, offer: NewOffer) -> StoreResult<Offer> {
        let offer = self.offers.insert_with(|id| offer.into_offer(id))?;
        tracing::info!(offer_id = %offer.id, code = %offer.code, "Offer added");
        Ok(offer)
    }

    /// Delete an offer. Returns `false` if no offer has this id.
    pub fn delete(&self, offer_id: &str) -> StoreResult<bool> {
        let removed = self.offers.remove(offer_id)?;
        if removed {
            tracing::info!(offer_id, "Offer deleted");
        } else {
            tracing::warn!(offer_id, "Delete requested for unknown offer");
        }
        Ok(removed)
    }

    pub fn find_by_id(&self, offer_id: &str) -> StoreResult<Option<Offer>> {
        self.offers.find(offer_id)
    }

    /// Offers matching `filter`, in stored order.
    pub fn search(&self, filter: &OfferFilter) -> StoreResult<Vec<Offer>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|offer| filter.matches(offer))
            .collect())
    }

    /// Up to `limit` featured offers that have not expired.
    pub fn featured(&self, today: NaiveDate, limit: usize) -> StoreResult<Vec<Offer>> {
        let filter = OfferFilter::new(today)
            .status(OfferStatus::Active)
            .featured_only();
        let mut offers = self.search(&filter)?;
        offers.truncate(limit);
        Ok(offers)
    }

    /// Other active offers sharing the category label of `offer_id`.
    ///
    /// Empty when the offer is unknown or has no category.
    pub fn related(&self, offer_id: &str, today: NaiveDate) -> StoreResult<Vec<Offer>> {
        let offers = self.get_all()?;
        let Some(category) = offers
            .iter()
            .find(|offer| offer.id == offer_id)
            .and_then(|offer| offer.category.clone())
        else {
            return Ok(Vec::new());
        };

        let filter = OfferFilter::new(today)
            .category(category)
            .status(OfferStatus::Active);
        Ok(offers
            .into_iter()
            .filter(|offer| offer.id != offer_id && filter.matches(offer))
            .collect())
    }
}
