//! Calculation logic for the pricing engine.
//!
//! This module contains all the calculation functions for pricing a
//! reservation: currency rounding, amenity quantity and age-category
//! resolution, applicable-date scheduling, amenity pricing with COMBO
//! decomposition, proportional tax allocation, city-tax computation, and
//! the reservation- and booking-level aggregation.

mod amenity_pricing;
mod booking_total;
mod city_tax;
mod quantity;
mod reservation_total;
mod rounding;
mod schedule;
mod tax_allocation;

pub use amenity_pricing::price_amenity;
pub use booking_total::aggregate_booking;
pub use city_tax::{merge_city_taxes, price_city_tax, rule_applies};
pub use quantity::{QuantityResolution, resolve_quantity};
pub use reservation_total::{
    PaymentTerms, RECONCILIATION_TOLERANCE, aggregate_reservation,
};
pub use rounding::{RoundingMode, RoundingRule};
pub use schedule::applicable_dates;
pub use tax_allocation::{TaxAllocator, combined_rate, merge_tax_charges};
