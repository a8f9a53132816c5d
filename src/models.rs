// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Offers and categories as they are persisted in the key-value store.
//! Field names on the wire are camelCase (`discountPercentage`,
//! `validUntil`, ...), matching the JSON layout written by earlier versions
//! of the marketplace.
//!
//! ## Optional strings
//!
//! Older records carry `""` for optional fields the admin form left empty.
//! Absent, `null`, and blank strings all read back as `None`; `None` is
//! omitted on write.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::ValidationError;

/// Minimum length of a category name, in characters.
pub const MIN_CATEGORY_NAME_LEN: usize = 2;

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_blank(value))
}

/// Blank optional strings mean "not set", whichever way they arrive.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Blank(field))
    } else {
        Ok(())
    }
}

// =============================================================================
// Offer Models
// =============================================================================

/// A discount/coupon record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Repository-assigned identifier.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Promo code shown to the shopper.
    pub code: String,
    /// Discount in percent, 1..=100 when created through a validated form.
    pub discount_percentage: u8,
    /// Last day the code is valid.
    pub valid_until: NaiveDate,
    /// Free-text category label.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_limited: bool,
    /// Inline `data:` URL image.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    /// Outbound link to the merchant.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub deal_url: Option<String>,
}

impl Offer {
    /// Whether the offer ran out before `today`.
    ///
    /// An offer is still valid on its `valid_until` day.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.valid_until < today
    }

    /// Long display form of the validity date, e.g. `September 30, 2025`.
    pub fn formatted_valid_until(&self) -> String {
        self.valid_until.format("%B %-d, %Y").to_string()
    }

    /// The offer's fields without its id.
    pub fn to_new(&self) -> NewOffer {
        NewOffer {
            title: self.title.clone(),
            description: self.description.clone(),
            code: self.code.clone(),
            discount_percentage: self.discount_percentage,
            valid_until: self.valid_until,
            category: self.category.clone(),
            is_featured: self.is_featured,
            is_limited: self.is_limited,
            image_url: self.image_url.clone(),
            deal_url: self.deal_url.clone(),
        }
    }
}

/// Offer fields supplied by the caller; the id is assigned on `add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewOffer {
    pub title: String,
    pub description: String,
    pub code: String,
    pub discount_percentage: u8,
    pub valid_until: NaiveDate,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_limited: bool,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub deal_url: Option<String>,
}

impl NewOffer {
    /// Offer with the required fields set and every optional field empty.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        code: impl Into<String>,
        discount_percentage: u8,
        valid_until: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            code: code.into(),
            discount_percentage,
            valid_until,
            category: None,
            is_featured: false,
            is_limited: false,
            image_url: None,
            deal_url: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank(Some(category.into()));
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    pub fn limited(mut self) -> Self {
        self.is_limited = true;
        self
    }

    pub fn with_image(mut self, data_url: impl Into<String>) -> Self {
        self.image_url = non_blank(Some(data_url.into()));
        self
    }

    pub fn with_deal_url(mut self, url: impl Into<String>) -> Self {
        self.deal_url = non_blank(Some(url.into()));
        self
    }

    /// Check the rules the admin form enforces before submitting.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("code", &self.code)?;

        if !(1..=100).contains(&self.discount_percentage) {
            return Err(ValidationError::DiscountOutOfRange(
                self.discount_percentage,
            ));
        }

        if let Some(link) = &self.deal_url {
            let parsed =
                Url::parse(link).map_err(|_| ValidationError::InvalidDealUrl(link.clone()))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ValidationError::InvalidDealUrl(link.clone()));
            }
        }

        Ok(())
    }

    /// Attach a repository-assigned id.
    pub(crate) fn into_offer(self, id: String) -> Offer {
        Offer {
            id,
            title: self.title,
            description: self.description,
            code: self.code,
            discount_percentage: self.discount_percentage,
            valid_until: self.valid_until,
            category: non_blank(self.category),
            is_featured: self.is_featured,
            is_limited: self.is_limited,
            image_url: non_blank(self.image_url),
            deal_url: non_blank(self.deal_url),
        }
    }
}

// =============================================================================
// Category Models
// =============================================================================

/// Icons the front-end renders from its own icon set rather than as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinIcon {
    Card,
    Fuel,
}

impl BuiltinIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinIcon::Card => "card",
            BuiltinIcon::Fuel => "fuel",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "card" => Some(BuiltinIcon::Card),
            "fuel" => Some(BuiltinIcon::Fuel),
            _ => None,
        }
    }
}

/// Category icon: a builtin token or a short emoji glyph.
///
/// Persisted as a bare string. Anything that is not a builtin token is kept
/// verbatim as a glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryIcon {
    Builtin(BuiltinIcon),
    Glyph(String),
}

impl CategoryIcon {
    pub fn as_str(&self) -> &str {
        match self {
            CategoryIcon::Builtin(icon) => icon.as_str(),
            CategoryIcon::Glyph(glyph) => glyph,
        }
    }
}

impl From<String> for CategoryIcon {
    fn from(value: String) -> Self {
        match BuiltinIcon::from_token(&value) {
            Some(icon) => CategoryIcon::Builtin(icon),
            None => CategoryIcon::Glyph(value),
        }
    }
}

impl From<&str> for CategoryIcon {
    fn from(value: &str) -> Self {
        CategoryIcon::from(value.to_string())
    }
}

impl From<BuiltinIcon> for CategoryIcon {
    fn from(value: BuiltinIcon) -> Self {
        CategoryIcon::Builtin(value)
    }
}

impl From<CategoryIcon> for String {
    fn from(value: CategoryIcon) -> Self {
        match value {
            CategoryIcon::Builtin(icon) => icon.as_str().to_string(),
            CategoryIcon::Glyph(glyph) => glyph,
        }
    }
}

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, icon-tagged grouping label for offers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: CategoryIcon,
}

/// Category fields supplied by the caller; the id is assigned on `add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub icon: CategoryIcon,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, icon: impl Into<CategoryIcon>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().chars().count() < MIN_CATEGORY_NAME_LEN {
            return Err(ValidationError::NameTooShort {
                min: MIN_CATEGORY_NAME_LEN,
            });
        }
        require("icon", self.icon.as_str())
    }

    pub(crate) fn into_category(self, id: String) -> Category {
        Category {
            id,
            name: self.name,
            icon: self.icon,
        }
    }
}

/// Partial category update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<CategoryIcon>,
}

impl CategoryPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<CategoryIcon>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.icon.is_none()
    }

    /// Shallow-merge the set fields into `category`.
    pub fn apply_to(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(icon) = self.icon {
            category.icon = icon;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_new_offer() -> NewOffer {
        NewOffer::new("Test", "A test offer", "T1", 10, date(2025, 12, 31))
    }

    #[test]
    fn offer_json_uses_camel_case() {
        let offer = sample_new_offer()
            .with_category("seasonal")
            .featured()
            .into_offer("abc".to_string());
        let json = serde_json::to_value(&offer).unwrap();

        assert_eq!(json["discountPercentage"], 10);
        assert_eq!(json["validUntil"], "2025-12-31");
        assert_eq!(json["isFeatured"], true);
        assert_eq!(json["isLimited"], false);
        assert_eq!(json["category"], "seasonal");
        assert!(json.get("imageUrl").is_none());
        assert!(json.get("dealUrl").is_none());
    }

    #[test]
    fn blank_optional_strings_read_as_none() {
        let raw = r#"{
            "id": "1",
            "title": "Summer Sale",
            "description": "Discounts",
            "code": "SUMMER20",
            "discountPercentage": 20,
            "validUntil": "2025-09-30",
            "category": "",
            "isFeatured": true,
            "isLimited": false,
            "imageUrl": "  ",
            "dealUrl": null
        }"#;
        let offer: Offer = serde_json::from_str(raw).unwrap();

        assert_eq!(offer.category, None);
        assert_eq!(offer.image_url, None);
        assert_eq!(offer.deal_url, None);
        assert!(offer.is_featured);
    }

    #[test]
    fn missing_flags_default_to_false() {
        let raw = r#"{"id":"9","title":"t","description":"d","code":"c",
            "discountPercentage":5,"validUntil":"2026-01-01"}"#;
        let offer: Offer = serde_json::from_str(raw).unwrap();
        assert!(!offer.is_featured);
        assert!(!offer.is_limited);
    }

    #[test]
    fn expiry_is_inclusive_of_last_day() {
        let offer = sample_new_offer().into_offer("x".to_string());
        assert!(!offer.is_expired(date(2025, 12, 31)));
        assert!(offer.is_expired(date(2026, 1, 1)));
    }

    #[test]
    fn formats_validity_date_long_form() {
        let mut offer = sample_new_offer().into_offer("x".to_string());
        offer.valid_until = date(2025, 9, 3);
        assert_eq!(offer.formatted_valid_until(), "September 3, 2025");
    }

    #[test]
    fn to_new_drops_only_the_id() {
        let new = sample_new_offer().limited().with_deal_url("https://shop.example");
        let offer = new.clone().into_offer("id-1".to_string());
        assert_eq!(offer.to_new(), new);
    }

    #[test]
    fn builders_drop_blank_optionals() {
        let new = sample_new_offer()
            .with_category("")
            .with_image("  ")
            .with_deal_url("\t");
        assert_eq!(new.category, None);
        assert_eq!(new.image_url, None);
        assert_eq!(new.deal_url, None);
    }

    #[test]
    fn fractional_discount_is_rejected() {
        let raw = r#"{"id":"9","title":"t","description":"d","code":"c",
            "discountPercentage":12.5,"validUntil":"2026-01-01"}"#;
        assert!(serde_json::from_str::<Offer>(raw).is_err());
    }

    #[test]
    fn validate_offer_rules() {
        assert!(sample_new_offer().validate().is_ok());

        let mut blank = sample_new_offer();
        blank.code = "   ".to_string();
        assert_eq!(blank.validate(), Err(ValidationError::Blank("code")));

        let mut zero = sample_new_offer();
        zero.discount_percentage = 0;
        assert_eq!(zero.validate(), Err(ValidationError::DiscountOutOfRange(0)));

        let mut too_much = sample_new_offer();
        too_much.discount_percentage = 101;
        assert!(too_much.validate().is_err());

        let ftp = sample_new_offer().with_deal_url("ftp://deals.example");
        assert!(matches!(
            ftp.validate(),
            Err(ValidationError::InvalidDealUrl(_))
        ));

        let relative = sample_new_offer().with_deal_url("/deals/1");
        assert!(relative.validate().is_err());
    }

    #[test]
    fn icon_tokens_round_trip_as_strings() {
        let card: CategoryIcon = serde_json::from_str(r#""card""#).unwrap();
        assert_eq!(card, CategoryIcon::Builtin(BuiltinIcon::Card));

        let glyph: CategoryIcon = serde_json::from_str(r#""💻""#).unwrap();
        assert_eq!(glyph, CategoryIcon::Glyph("💻".to_string()));

        let category = Category {
            id: "1".to_string(),
            name: "Fuel".to_string(),
            icon: BuiltinIcon::Fuel.into(),
        };
        assert_eq!(
            serde_json::to_string(&category).unwrap(),
            r#"{"id":"1","name":"Fuel","icon":"fuel"}"#
        );
    }

    #[test]
    fn validate_category_rules() {
        assert!(NewCategory::new("Travel", "✈️").validate().is_ok());
        assert_eq!(
            NewCategory::new(" T ", "✈️").validate(),
            Err(ValidationError::NameTooShort { min: 2 })
        );
        assert_eq!(
            NewCategory::new("Travel", "").validate(),
            Err(ValidationError::Blank("icon"))
        );
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let mut category = Category {
            id: "1".to_string(),
            name: "Electronics".to_string(),
            icon: "💻".into(),
        };

        CategoryPatch::default().name("Gadgets").apply_to(&mut category);
        assert_eq!(category.name, "Gadgets");
        assert_eq!(category.icon.as_str(), "💻");

        CategoryPatch::default()
            .icon(BuiltinIcon::Card)
            .apply_to(&mut category);
        assert_eq!(category.name, "Gadgets");
        assert_eq!(category.icon, CategoryIcon::Builtin(BuiltinIcon::Card));

        assert!(CategoryPatch::default().is_empty());
    }
}
