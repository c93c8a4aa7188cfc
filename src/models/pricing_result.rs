//! Pricing result models.
//!
//! This module contains the output types produced by the pricing engine:
//! per-amenity results, city-tax charges, reservation totals and booking
//! totals. Monetary fields are non-optional decimals that default to an
//! exact zero at construction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amenity::PricingUnit;
use super::tax::CityTaxChargeMethod;

/// One tax code's share of a service's tax amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCharge {
    /// The tax code (e.g. "VAT19").
    pub code: String,
    /// Human-readable tax name.
    pub name: String,
    /// The rule's rate as a fraction.
    pub rate: Decimal,
    /// The allocated tax amount.
    pub amount: Decimal,
}

/// One applicable date of an amenity charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCharge {
    /// The date the charge applies to.
    pub date: NaiveDate,
    /// The rounded selling price for this date.
    pub price: Decimal,
    /// The charged unit count on this date.
    pub count: u32,
}

/// The portion of an amenity charge priced at one age category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCategoryCharge {
    /// The age-category code.
    pub category: String,
    /// Units charged at this category.
    pub count: u32,
    /// The category's unit price.
    pub unit_price: Decimal,
    /// Per-date total for this category (count times unit price).
    pub total: Decimal,
}

/// The fully-priced result for one amenity.
///
/// For COMBO amenities the totals are the sums of the independently priced
/// linked amenities, which are retained in `linked_results`; the parent's
/// own daily and age-category breakdowns stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmenityPricingResult {
    /// The amenity code.
    pub code: String,
    /// The amenity name.
    pub name: String,
    /// The pricing unit the amenity was charged under.
    pub unit: PricingUnit,
    /// Net amount.
    pub base_amount: Decimal,
    /// Tax amount (including tax on the service charge).
    pub tax_amount: Decimal,
    /// Service-charge amount.
    pub service_charge_amount: Decimal,
    /// Gross amount.
    pub gross_amount: Decimal,
    /// Average selling amount per night of the stay.
    pub average_daily_amount: Decimal,
    /// Per-date breakdown.
    pub daily_charges: Vec<DailyCharge>,
    /// Per-age-category breakdown.
    pub age_category_charges: Vec<AgeCategoryCharge>,
    /// Per-tax-code breakdown.
    pub tax_charges: Vec<TaxCharge>,
    /// Fully-priced linked amenities (COMBO only).
    pub linked_results: Vec<AmenityPricingResult>,
    /// True when the amenity is already included in the room's selling
    /// price and must not be added to reservation totals again.
    pub plan_included: bool,
}

/// One city-tax rule's computed amount for a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTaxCharge {
    /// The city-tax code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// The computed tax amount.
    pub amount: Decimal,
    /// The amount computed against the before-adjustment room prices.
    pub amount_before_adjustment: Decimal,
    /// When the tax is collected.
    pub charge_method: CityTaxChargeMethod,
}

/// The complete pricing of one reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationPricingResult {
    /// Per-amenity pricing, including plan-included amenities.
    pub amenities: Vec<AmenityPricingResult>,
    /// City-tax breakdown.
    pub city_taxes: Vec<CityTaxCharge>,
    /// Room net plus non-included amenity net.
    pub total_base_amount: Decimal,
    /// Room gross plus non-included amenity gross.
    pub total_gross_amount: Decimal,
    /// Room tax plus non-included amenity tax.
    pub total_tax_amount: Decimal,
    /// Room service charge plus non-included amenity service charge.
    pub total_service_charge_amount: Decimal,
    /// Total gross divided by length of stay, rounded.
    pub average_daily_rate: Decimal,
    /// The per-night average of the gross or the net total, depending on
    /// the hotel's display setting.
    pub average_daily_rate_by_setting: Decimal,
    /// Amount due with the booking payment.
    pub pay_on_confirmation: Decimal,
    /// Amount due at the hotel.
    pub pay_at_hotel: Decimal,
    /// Room tax per code.
    pub accommodation_taxes: Vec<TaxCharge>,
    /// Non-included amenity tax per code.
    pub extra_service_taxes: Vec<TaxCharge>,
    /// Combined room plus amenity tax per code. The authoritative
    /// per-reservation tax breakdown.
    pub tax_totals: Vec<TaxCharge>,
    /// ISO currency code of all amounts.
    pub currency: String,
}

/// The summed pricing of a whole booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPricingResult {
    /// Number of reservations aggregated.
    pub reservation_count: usize,
    /// Sum of reservation net totals.
    pub total_base_amount: Decimal,
    /// Sum of reservation gross totals.
    pub total_gross_amount: Decimal,
    /// Sum of reservation tax totals.
    pub total_tax_amount: Decimal,
    /// Sum of reservation service-charge totals.
    pub total_service_charge_amount: Decimal,
    /// Sum of pay-on-confirmation amounts.
    pub pay_on_confirmation: Decimal,
    /// Sum of pay-at-hotel amounts.
    pub pay_at_hotel: Decimal,
    /// Accommodation taxes grouped by code across reservations.
    pub accommodation_taxes: Vec<TaxCharge>,
    /// Extra-service taxes grouped by code across reservations.
    pub extra_service_taxes: Vec<TaxCharge>,
    /// City taxes grouped by code across reservations.
    pub city_taxes: Vec<CityTaxCharge>,
    /// ISO currency code of all amounts.
    pub currency: String,
}
