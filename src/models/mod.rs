//! Core data models for the pricing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod amenity;
mod occupancy;
mod pricing_result;
mod room;
mod tax;

pub use amenity::{
    AgeCategoryPrice, AmenityCatalog, AmenityDefinition, AvailabilityMode, DEFAULT_AGE_CATEGORY,
    PET_SURCHARGE_CODE, PricingUnit, SellingType,
};
pub use occupancy::ReservationOccupancy;
pub use pricing_result::{
    AgeCategoryCharge, AmenityPricingResult, BookingPricingResult, CityTaxCharge, DailyCharge,
    ReservationPricingResult, TaxCharge,
};
pub use room::{RoomPriceDay, RoomPricing};
pub use tax::{
    ACCOMMODATION_SERVICE_CODE, CityTaxChargeMethod, CityTaxRule, CityTaxUnit, HotelTaxLookup,
    ServiceTaxBindings, TaxRule,
};
