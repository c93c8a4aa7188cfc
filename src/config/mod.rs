//! Configuration loading and management for the pricing engine.
//!
//! This module provides functionality to load a hotel's pricing
//! configuration from YAML files: the pricing settings, tax rules with
//! their service bindings, city-tax rules and the amenity catalog.
//!
//! # Example
//!
//! ```no_run
//! use stay_pricing::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/grand_meridian").unwrap();
//! println!("Currency: {}", loader.config().pricing().currency);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AmenitiesConfig, CityTaxesConfig, HotelConfig, HotelPricingConfig, TaxInclusion, TaxesConfig,
};
