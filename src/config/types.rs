//! Configuration types for hotel pricing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the [`HotelConfig`]
//! aggregate the engine reads them from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calculation::RoundingRule;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AmenityCatalog, AmenityDefinition, CityTaxRule, HotelTaxLookup, ServiceTaxBindings, TaxRule,
};

/// Whether a quoted selling price already contains a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxInclusion {
    /// The selling price contains the charge.
    Inclusive,
    /// The charge is added on top of the selling price.
    Exclusive,
}

/// Per-hotel pricing settings, loaded from `hotel.yaml`.
///
/// Immutable for the duration of a calculation call.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelPricingConfig {
    /// ISO currency code all amounts are denominated in.
    pub currency: String,
    /// Whether selling prices contain statutory tax.
    pub tax_setting: TaxInclusion,
    /// Whether selling prices contain the service charge.
    pub service_charge_setting: TaxInclusion,
    /// Service-charge rate as a fraction of the net amount.
    pub service_charge_rate: Decimal,
    /// Tax rate applied to the service charge, as a fraction.
    pub service_charge_tax_rate: Decimal,
    /// Which total the "by setting" average daily rate reports.
    pub display_setting: TaxInclusion,
    /// The currency rounding rule.
    pub rounding: RoundingRule,
}

/// Tax rules file structure (`taxes.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TaxesConfig {
    /// All statutory tax rules of the hotel.
    pub taxes: Vec<TaxRule>,
    /// Service code to tax-code bindings.
    pub bindings: HashMap<String, Vec<String>>,
}

/// City-tax rules file structure (`city_taxes.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct CityTaxesConfig {
    /// All city-tax rules of the hotel.
    pub city_taxes: Vec<CityTaxRule>,
}

/// Amenity catalog file structure (`amenities.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct AmenitiesConfig {
    /// All amenity definitions of the hotel.
    pub amenities: Vec<AmenityDefinition>,
}

/// The complete hotel configuration loaded from YAML files.
///
/// This struct aggregates the pricing settings, the tax rules with their
/// service bindings, the city-tax rules and the amenity catalog. It is the
/// read-only data provider the calculation entry points consume.
#[derive(Debug, Clone)]
pub struct HotelConfig {
    pricing: HotelPricingConfig,
    taxes: HashMap<String, TaxRule>,
    bindings: ServiceTaxBindings,
    city_taxes: Vec<CityTaxRule>,
    amenities: HashMap<String, AmenityDefinition>,
}

impl HotelConfig {
    /// Creates a new HotelConfig from its component parts.
    ///
    /// Validates the settings the engine cannot run without: a non-empty
    /// currency, a DEFAULT price on every amenity, and binding codes that
    /// resolve to loaded tax rules.
    pub fn new(
        pricing: HotelPricingConfig,
        taxes: Vec<TaxRule>,
        binding_codes: HashMap<String, Vec<String>>,
        city_taxes: Vec<CityTaxRule>,
        amenities: Vec<AmenityDefinition>,
    ) -> EngineResult<Self> {
        if pricing.currency.trim().is_empty() {
            return Err(EngineError::InvalidConfig {
                field: "currency".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let taxes: HashMap<String, TaxRule> =
            taxes.into_iter().map(|t| (t.code.clone(), t)).collect();

        let mut bindings = ServiceTaxBindings::new();
        for (service_code, codes) in binding_codes {
            let mut rules = Vec::with_capacity(codes.len());
            for code in codes {
                let rule = taxes.get(&code).ok_or_else(|| EngineError::InvalidConfig {
                    field: format!("bindings.{service_code}"),
                    message: format!("unknown tax code '{code}'"),
                })?;
                rules.push(rule.clone());
            }
            bindings.bind(service_code, rules);
        }

        let mut amenity_map = HashMap::with_capacity(amenities.len());
        for amenity in amenities {
            if amenity.default_price().is_none() {
                return Err(EngineError::MissingDefaultAgeCategory {
                    code: amenity.code.clone(),
                });
            }
            amenity_map.insert(amenity.code.clone(), amenity);
        }

        Ok(Self {
            pricing,
            taxes,
            bindings,
            city_taxes,
            amenities: amenity_map,
        })
    }

    /// Returns the hotel pricing settings.
    pub fn pricing(&self) -> &HotelPricingConfig {
        &self.pricing
    }

    /// Returns the service-to-tax bindings.
    pub fn bindings(&self) -> &ServiceTaxBindings {
        &self.bindings
    }

    /// Returns all city-tax rules of the hotel.
    pub fn city_tax_rules(&self) -> &[CityTaxRule] {
        &self.city_taxes
    }

    /// Returns the amenity definition for `code`.
    pub fn amenity(&self, code: &str) -> Option<&AmenityDefinition> {
        self.amenities.get(code)
    }
}

impl AmenityCatalog for HotelConfig {
    fn amenity_by_code(&self, code: &str) -> Option<&AmenityDefinition> {
        self.amenities.get(code)
    }
}

impl HotelTaxLookup for HotelConfig {
    fn tax_rule(&self, code: &str) -> Option<&TaxRule> {
        self.taxes.get(code)
    }

    fn city_tax_rule(&self, code: &str) -> Option<&CityTaxRule> {
        self.city_taxes.iter().find(|r| r.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::RoundingMode;
    use crate::models::{
        AgeCategoryPrice, AvailabilityMode, DEFAULT_AGE_CATEGORY, PricingUnit, SellingType,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pricing() -> HotelPricingConfig {
        HotelPricingConfig {
            currency: "EUR".to_string(),
            tax_setting: TaxInclusion::Exclusive,
            service_charge_setting: TaxInclusion::Exclusive,
            service_charge_rate: dec("0.10"),
            service_charge_tax_rate: dec("0.19"),
            display_setting: TaxInclusion::Inclusive,
            rounding: RoundingRule {
                mode: RoundingMode::HalfUp,
                places: 2,
            },
        }
    }

    fn vat() -> TaxRule {
        TaxRule {
            code: "VAT19".to_string(),
            name: "VAT 19%".to_string(),
            rate: dec("0.19"),
            valid_from: None,
            valid_to: None,
        }
    }

    fn breakfast() -> AmenityDefinition {
        AmenityDefinition {
            code: "BRKFST".to_string(),
            name: "Breakfast".to_string(),
            unit: PricingUnit::Person,
            selling_type: SellingType::Single,
            prices: vec![AgeCategoryPrice {
                category: DEFAULT_AGE_CATEGORY.to_string(),
                from_age: None,
                to_age: None,
                price: dec("25.00"),
            }],
            linked_codes: vec![],
            availability: AvailabilityMode::Active,
            item_count: 1,
        }
    }

    #[test]
    fn test_new_resolves_bindings() {
        let config = HotelConfig::new(
            pricing(),
            vec![vat()],
            HashMap::from([("BRKFST".to_string(), vec!["VAT19".to_string()])]),
            vec![],
            vec![breakfast()],
        )
        .unwrap();
        assert_eq!(config.bindings().rules_for("BRKFST").len(), 1);
        assert!(config.bindings().rules_for("SPA").is_empty());
    }

    #[test]
    fn test_new_rejects_empty_currency() {
        let mut p = pricing();
        p.currency = " ".to_string();
        let err = HotelConfig::new(p, vec![], HashMap::new(), vec![], vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
    }

    #[test]
    fn test_new_rejects_unknown_binding_code() {
        let err = HotelConfig::new(
            pricing(),
            vec![],
            HashMap::from([("BRKFST".to_string(), vec!["VAT19".to_string()])]),
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
    }

    #[test]
    fn test_new_rejects_amenity_without_default_price() {
        let mut amenity = breakfast();
        amenity.prices.clear();
        let err =
            HotelConfig::new(pricing(), vec![], HashMap::new(), vec![], vec![amenity]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingDefaultAgeCategory { code } if code == "BRKFST"
        ));
    }

    #[test]
    fn test_tax_lookup() {
        let config =
            HotelConfig::new(pricing(), vec![vat()], HashMap::new(), vec![], vec![]).unwrap();
        assert!(config.tax_rule("VAT19").is_some());
        assert!(config.tax_rule("VAT7").is_none());
        assert!(config.city_tax_rule("CTX").is_none());
    }
}
