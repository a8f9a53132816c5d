// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sample collections returned while nothing has been persisted yet.
//!
//! These are read-time defaults. Repositories never write them back on
//! their own; the first `add`/`delete`/`update` persists whatever the
//! mutated snapshot contains.

use chrono::NaiveDate;

use crate::models::{Category, CategoryIcon, Offer};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// The three sample offers.
pub fn offers() -> Vec<Offer> {
    vec![
        Offer {
            id: "1".to_string(),
            title: "Summer Sale".to_string(),
            description: "Get amazing discounts on all summer products".to_string(),
            code: "SUMMER20".to_string(),
            discount_percentage: 20,
            valid_until: date(2025, 9, 30),
            category: Some("seasonal".to_string()),
            is_featured: true,
            is_limited: false,
            image_url: None,
            deal_url: None,
        },
        Offer {
            id: "2".to_string(),
            title: "New Customer Discount".to_string(),
            description: "Special discount for first-time customers".to_string(),
            code: "WELCOME15".to_string(),
            discount_percentage: 15,
            valid_until: date(2025, 12, 31),
            category: Some("new-customer".to_string()),
            is_featured: false,
            is_limited: false,
            image_url: None,
            deal_url: None,
        },
        Offer {
            id: "3".to_string(),
            title: "Flash Sale Friday".to_string(),
            description: "Limited time offer. Valid only this Friday!".to_string(),
            code: "FLASH30".to_string(),
            discount_percentage: 30,
            valid_until: date(2025, 6, 7),
            category: Some("flash-sale".to_string()),
            is_featured: false,
            is_limited: true,
            image_url: None,
            deal_url: None,
        },
    ]
}

/// The six sample categories.
pub fn categories() -> Vec<Category> {
    [
        ("1", "Electronics", "💻"),
        ("2", "Fashion", "👕"),
        ("3", "Food & Dining", "🍴"),
        ("4", "Travel", "✈️"),
        ("5", "Beauty", "✨"),
        ("6", "Home & Garden", "🏠"),
    ]
    .into_iter()
    .map(|(id, name, icon)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: CategoryIcon::from(icon),
    })
    .collect()
}
