//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a hotel's
//! pricing configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AmenitiesConfig, CityTaxesConfig, HotelConfig, HotelPricingConfig, TaxesConfig};

/// Loads and provides access to a hotel's pricing configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// exposes the resulting [`HotelConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/grand_meridian/
/// ├── hotel.yaml       # Pricing settings (currency, tax mode, rounding)
/// ├── taxes.yaml       # Tax rules and service bindings
/// ├── city_taxes.yaml  # City-tax rules
/// └── amenities.yaml   # Amenity catalog
/// ```
///
/// # Example
///
/// ```no_run
/// use stay_pricing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/grand_meridian").unwrap();
/// println!("Currency: {}", loader.config().pricing().currency);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HotelConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/grand_meridian")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The configuration fails referential validation (unknown tax codes
    ///   in bindings, amenities without a DEFAULT price, empty currency)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let hotel_path = path.join("hotel.yaml");
        let pricing = Self::load_yaml::<HotelPricingConfig>(&hotel_path)?;

        let taxes_path = path.join("taxes.yaml");
        let taxes_config = Self::load_yaml::<TaxesConfig>(&taxes_path)?;

        let city_taxes_path = path.join("city_taxes.yaml");
        let city_taxes_config = Self::load_yaml::<CityTaxesConfig>(&city_taxes_path)?;

        let amenities_path = path.join("amenities.yaml");
        let amenities_config = Self::load_yaml::<AmenitiesConfig>(&amenities_path)?;

        let config = HotelConfig::new(
            pricing,
            taxes_config.taxes,
            taxes_config.bindings,
            city_taxes_config.city_taxes,
            amenities_config.amenities,
        )?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded hotel configuration.
    pub fn config(&self) -> &HotelConfig {
        &self.config
    }
}
