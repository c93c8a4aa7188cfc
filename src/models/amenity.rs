//! Amenity catalog models.
//!
//! This module defines the [`AmenityDefinition`] describing a sellable
//! extra service, its pricing unit, selling type and age-banded price list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The age-category code every amenity price list must contain.
pub const DEFAULT_AGE_CATEGORY: &str = "DEFAULT";

/// The reserved amenity code for the hotel's pet surcharge.
pub const PET_SURCHARGE_CODE: &str = "PET_FEE";

/// The basis on which an amenity is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingUnit {
    /// One charge per night of the stay.
    Night,
    /// One charge per person per applicable date.
    Person,
    /// One charge per room, on arrival.
    Room,
    /// A fixed item count, charged on arrival.
    Item,
    /// One charge for the whole stay.
    Stay,
    /// One charge per person per room per applicable date.
    PerPersonPerRoom,
}

impl PricingUnit {
    /// Returns true for units whose count scales with the person count.
    pub fn is_person_based(self) -> bool {
        matches!(self, PricingUnit::Person | PricingUnit::PerPersonPerRoom)
    }

    /// Returns true for units charged on every night date rather than once
    /// on arrival.
    pub fn is_nightly(self) -> bool {
        matches!(
            self,
            PricingUnit::Night | PricingUnit::Person | PricingUnit::PerPersonPerRoom
        )
    }
}

/// How an amenity is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellingType {
    /// A standalone amenity with its own price list.
    Single,
    /// An amenity sold as part of a package rate.
    Package,
    /// A composite amenity priced as the sum of its linked amenities.
    Combo,
}

/// Whether an amenity can currently be sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityMode {
    /// The amenity is sellable.
    Active,
    /// The amenity is retired or suspended.
    Inactive,
}

/// A banded selling price for one age category.
///
/// The `DEFAULT` category has no age bounds and prices adults plus any
/// children not covered by a more specific band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCategoryPrice {
    /// The age-category code (e.g. "DEFAULT", "CHILD").
    pub category: String,
    /// Lower age bound, inclusive. Absent for DEFAULT.
    #[serde(default)]
    pub from_age: Option<u32>,
    /// Upper age bound, inclusive. Absent for DEFAULT.
    #[serde(default)]
    pub to_age: Option<u32>,
    /// The unit selling price for this category.
    pub price: Decimal,
}

impl AgeCategoryPrice {
    /// Returns true if this is the DEFAULT category.
    pub fn is_default(&self) -> bool {
        self.category == DEFAULT_AGE_CATEGORY
    }

    /// Returns true if the category's age band contains `age`.
    ///
    /// Absent bounds are open: a band with only `to_age: 12` matches every
    /// age up to and including 12.
    pub fn matches_age(&self, age: u32) -> bool {
        self.from_age.is_none_or(|from| age >= from) && self.to_age.is_none_or(|to| age <= to)
    }
}

/// The catalog definition of one amenity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmenityDefinition {
    /// Unique amenity code (e.g. "BRKFST").
    pub code: String,
    /// Human-readable amenity name.
    pub name: String,
    /// The basis on which the amenity is charged.
    pub unit: PricingUnit,
    /// How the amenity is sold.
    pub selling_type: SellingType,
    /// Age-banded selling prices. Must contain the DEFAULT category.
    pub prices: Vec<AgeCategoryPrice>,
    /// Codes of the linked amenities. Only meaningful for COMBO.
    #[serde(default)]
    pub linked_codes: Vec<String>,
    /// Whether the amenity is currently sellable.
    pub availability: AvailabilityMode,
    /// Fixed charge count for ITEM-unit amenities.
    #[serde(default = "default_item_count")]
    pub item_count: u32,
}

fn default_item_count() -> u32 {
    1
}

impl AmenityDefinition {
    /// Returns the DEFAULT category price entry, if present.
    pub fn default_price(&self) -> Option<&AgeCategoryPrice> {
        self.prices.iter().find(|p| p.is_default())
    }

    /// Returns true if this amenity is the pet surcharge.
    ///
    /// Detection is by exact match on the reserved code plus a
    /// case-insensitive substring check on "PET".
    pub fn is_pet_surcharge(&self) -> bool {
        self.code == PET_SURCHARGE_CODE || self.code.to_ascii_uppercase().contains("PET")
    }
}

/// Read-only amenity lookup used to resolve COMBO links.
///
/// Implemented by the loaded hotel configuration, and by a plain
/// `HashMap` for tests.
pub trait AmenityCatalog {
    /// Returns the amenity definition for `code`, if it exists.
    fn amenity_by_code(&self, code: &str) -> Option<&AmenityDefinition>;
}

impl AmenityCatalog for HashMap<String, AmenityDefinition> {
    fn amenity_by_code(&self, code: &str) -> Option<&AmenityDefinition> {
        self.get(code)
    }
}
