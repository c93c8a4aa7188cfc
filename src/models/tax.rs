//! Tax rule models.
//!
//! This module defines statutory tax rules with validity windows, the
//! service-to-tax bindings, and the municipal city-tax rules with their
//! charge units.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The service code under which accommodation taxes are bound.
pub const ACCOMMODATION_SERVICE_CODE: &str = "ACCOMMODATION";

/// A statutory tax rule (e.g. VAT) with an optional validity window.
///
/// The rate is a fraction: 0.19 means 19%. A rule applies to a calendar
/// date only when the date falls inside `[valid_from, valid_to]`; absent
/// bounds are unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    /// Unique tax code (e.g. "VAT19").
    pub code: String,
    /// Human-readable tax name.
    pub name: String,
    /// Tax rate as a fraction (0.19 = 19%).
    pub rate: Decimal,
    /// First date the rule is valid, inclusive.
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    /// Last date the rule is valid, inclusive.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

impl TaxRule {
    /// Returns true if the rule is valid on `date`.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.valid_from.is_none_or(|from| date >= from)
            && self.valid_to.is_none_or(|to| date <= to)
    }
}

/// Maps service codes (amenity codes, or accommodation) to the tax rules
/// charged on them.
///
/// A service without bindings is simply untaxed; lookups never fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTaxBindings {
    bindings: HashMap<String, Vec<TaxRule>>,
}

impl ServiceTaxBindings {
    /// Creates an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `rules` to `service_code`, replacing any previous binding.
    pub fn bind(&mut self, service_code: impl Into<String>, rules: Vec<TaxRule>) {
        self.bindings.insert(service_code.into(), rules);
    }

    /// Returns the tax rules bound to `service_code`, or an empty slice.
    pub fn rules_for(&self, service_code: &str) -> &[TaxRule] {
        self.bindings
            .get(service_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The charge unit of a city-tax rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityTaxUnit {
    /// Fixed amount per allocated room.
    FixedPerRoom,
    /// Percentage of the gross room price.
    PercentOfGrossRoom,
    /// Percentage of the net (base) room price.
    PercentOfNetRoom,
    /// Fixed amount per person per night.
    PerPersonPerNight,
    /// Fixed amount per person for the whole stay.
    PerPersonPerStayFixed,
    /// Fixed amount per room per night.
    PerRoomPerNight,
}

impl CityTaxUnit {
    /// Returns true for units that additionally charge each child in the
    /// occupancy. Percentage-based units never do.
    pub fn charges_children(self) -> bool {
        matches!(
            self,
            CityTaxUnit::PerPersonPerNight | CityTaxUnit::PerPersonPerStayFixed
        )
    }

    /// Returns true for per-night units, whose applicability window is
    /// compared against the end of the stay range.
    pub fn is_per_night(self) -> bool {
        matches!(
            self,
            CityTaxUnit::PerPersonPerNight | CityTaxUnit::PerRoomPerNight
        )
    }
}

/// When a city tax is collected from the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityTaxChargeMethod {
    /// Collected with the booking payment.
    PayOnConfirmation,
    /// Collected at the hotel on site.
    PayAtHotel,
}

/// A municipal city-tax rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTaxRule {
    /// Unique city-tax code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// The charge unit.
    pub unit: CityTaxUnit,
    /// Rate (for percentage units, in percent: 5 = 5%) or fixed value.
    pub amount: Decimal,
    /// First date the rule is valid, inclusive.
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    /// Last date the rule is valid, inclusive.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    /// When the tax is collected.
    pub charge_method: CityTaxChargeMethod,
}

/// Read-only hotel-level tax lookup used when booking totals re-resolve
/// names and rates by tax code.
pub trait HotelTaxLookup {
    /// Returns the statutory tax rule for `code`, if known.
    fn tax_rule(&self, code: &str) -> Option<&TaxRule>;
    /// Returns the city-tax rule for `code`, if known.
    fn city_tax_rule(&self, code: &str) -> Option<&CityTaxRule>;
}
