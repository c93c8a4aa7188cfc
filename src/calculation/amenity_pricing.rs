//! Amenity pricing engine.
//!
//! Prices one amenity for a stay: quantity resolution, age-category
//! splitting, applicable dates, daily tax and service-charge math under
//! the hotel's inclusive/exclusive settings, and recursive decomposition
//! of COMBO composites into independently priced linked amenities.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{HotelPricingConfig, TaxInclusion};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AmenityCatalog, AmenityDefinition, AmenityPricingResult, AvailabilityMode, DailyCharge,
    ReservationOccupancy, SellingType, ServiceTaxBindings, TaxRule,
};

use super::quantity::resolve_quantity;
use super::schedule::applicable_dates;
use super::tax_allocation::{TaxAllocator, combined_rate, merge_tax_charges};

/// Prices one amenity for a stay.
///
/// COMBO amenities are decomposed into their linked amenities, each priced
/// independently with its own age-category prices and tax bindings; the
/// parent's totals are the sums of the children's totals and the children
/// are retained on the result for downstream consumers.
///
/// `plan_included` marks amenities already contained in the room's selling
/// price; their applicable dates are governed by `included_dates` and the
/// reservation aggregator excludes them from reservation totals.
///
/// # Errors
///
/// - [`EngineError::MissingDefaultAgeCategory`] if a price list lacks the
///   DEFAULT entry.
/// - [`EngineError::AmenityNotFound`], [`EngineError::AmenityInactive`] or
///   [`EngineError::CircularAmenityReference`] when COMBO resolution fails.
///   No partial COMBO result is ever returned.
pub fn price_amenity<C: AmenityCatalog>(
    definition: &AmenityDefinition,
    occupancy: &ReservationOccupancy,
    plan_included: bool,
    included_dates: &[NaiveDate],
    config: &HotelPricingConfig,
    bindings: &ServiceTaxBindings,
    catalog: &C,
) -> EngineResult<AmenityPricingResult> {
    let mut ancestry = Vec::new();
    price_with_ancestry(
        definition,
        occupancy,
        plan_included,
        included_dates,
        config,
        bindings,
        catalog,
        &mut ancestry,
    )
}

#[allow(clippy::too_many_arguments)]
fn price_with_ancestry<C: AmenityCatalog>(
    definition: &AmenityDefinition,
    occupancy: &ReservationOccupancy,
    plan_included: bool,
    included_dates: &[NaiveDate],
    config: &HotelPricingConfig,
    bindings: &ServiceTaxBindings,
    catalog: &C,
    ancestry: &mut Vec<String>,
) -> EngineResult<AmenityPricingResult> {
    if definition.selling_type == SellingType::Combo {
        price_combo(
            definition,
            occupancy,
            plan_included,
            included_dates,
            config,
            bindings,
            catalog,
            ancestry,
        )
    } else {
        price_single(
            definition,
            occupancy,
            plan_included,
            included_dates,
            config,
            bindings,
        )
    }
}

/// Prices a COMBO as the sum of its independently priced linked amenities.
#[allow(clippy::too_many_arguments)]
fn price_combo<C: AmenityCatalog>(
    definition: &AmenityDefinition,
    occupancy: &ReservationOccupancy,
    plan_included: bool,
    included_dates: &[NaiveDate],
    config: &HotelPricingConfig,
    bindings: &ServiceTaxBindings,
    catalog: &C,
    ancestry: &mut Vec<String>,
) -> EngineResult<AmenityPricingResult> {
    ancestry.push(definition.code.clone());

    let mut linked_results = Vec::with_capacity(definition.linked_codes.len());
    for code in &definition.linked_codes {
        if ancestry.iter().any(|c| c == code) {
            return Err(EngineError::CircularAmenityReference {
                combo: definition.code.clone(),
                code: code.clone(),
            });
        }
        let linked =
            catalog
                .amenity_by_code(code)
                .ok_or_else(|| EngineError::AmenityNotFound {
                    combo: definition.code.clone(),
                    code: code.clone(),
                })?;
        if linked.availability != AvailabilityMode::Active {
            return Err(EngineError::AmenityInactive {
                combo: definition.code.clone(),
                code: code.clone(),
            });
        }
        linked_results.push(price_with_ancestry(
            linked,
            occupancy,
            plan_included,
            included_dates,
            config,
            bindings,
            catalog,
            ancestry,
        )?);
    }

    ancestry.pop();

    // Parent totals are plain sums of the children's rounded totals, so
    // additivity holds to the cent.
    let base_amount: Decimal = linked_results.iter().map(|r| r.base_amount).sum();
    let tax_amount: Decimal = linked_results.iter().map(|r| r.tax_amount).sum();
    let service_charge_amount: Decimal = linked_results
        .iter()
        .map(|r| r.service_charge_amount)
        .sum();
    let gross_amount: Decimal = linked_results.iter().map(|r| r.gross_amount).sum();

    let tax_charges = merge_tax_charges(
        linked_results
            .iter()
            .flat_map(|r| r.tax_charges.iter().cloned()),
    );

    let selling_total = match config.tax_setting {
        TaxInclusion::Exclusive => base_amount,
        TaxInclusion::Inclusive => gross_amount,
    };
    let average_daily_amount = config
        .rounding
        .round(selling_total / occupancy.length_of_stay());

    Ok(AmenityPricingResult {
        code: definition.code.clone(),
        name: definition.name.clone(),
        unit: definition.unit,
        base_amount,
        tax_amount,
        service_charge_amount,
        gross_amount,
        average_daily_amount,
        daily_charges: Vec::new(),
        age_category_charges: Vec::new(),
        tax_charges,
        linked_results,
        plan_included,
    })
}

/// Prices a non-composite amenity.
fn price_single(
    definition: &AmenityDefinition,
    occupancy: &ReservationOccupancy,
    plan_included: bool,
    included_dates: &[NaiveDate],
    config: &HotelPricingConfig,
    bindings: &ServiceTaxBindings,
) -> EngineResult<AmenityPricingResult> {
    let quantity = resolve_quantity(definition, occupancy)?;
    let dates = applicable_dates(definition.unit, occupancy, plan_included, included_dates);
    let rules = bindings.rules_for(&definition.code);

    let mut raw_base = Decimal::ZERO;
    let mut raw_tax = Decimal::ZERO;
    let mut raw_service_charge = Decimal::ZERO;
    let mut raw_gross = Decimal::ZERO;
    let mut raw_selling = Decimal::ZERO;
    let mut allocator = TaxAllocator::new();
    let mut daily_charges = Vec::with_capacity(dates.len());

    for date in dates {
        let selling = quantity.per_date_price;
        let valid_rules: Vec<&TaxRule> = rules.iter().filter(|r| r.applies_on(date)).collect();
        let rate_sum = combined_rate(&valid_rules);

        let (base, service_charge, tax, gross) = match config.tax_setting {
            TaxInclusion::Exclusive => {
                // The selling price is the net amount; tax and service
                // charge stack on top.
                let base = selling;
                let service_charge = exclusive_service_charge(base, config);
                let tax = if rate_sum.is_zero() {
                    Decimal::ZERO
                } else {
                    base * rate_sum + service_charge * config.service_charge_tax_rate
                };
                let gross = base + service_charge + tax;
                (base, service_charge, tax, gross)
            }
            TaxInclusion::Inclusive => {
                // The selling price is the gross amount; the net is derived
                // by removing the combined rate multiplicatively.
                let gross = selling;
                let base = gross * (Decimal::ONE - rate_sum);
                let service_charge = exclusive_service_charge(base, config);
                let tax = if rate_sum.is_zero() {
                    Decimal::ZERO
                } else {
                    gross - base - service_charge
                };
                (base, service_charge, tax, gross)
            }
        };

        allocator.accrue(&valid_rules, tax);
        raw_base += base;
        raw_service_charge += service_charge;
        raw_tax += tax;
        raw_gross += gross;
        raw_selling += selling;

        daily_charges.push(DailyCharge {
            date,
            price: config.rounding.round(selling),
            count: quantity.count,
        });
    }

    // Totals are rounded from the raw daily values, independently of the
    // rounded per-date breakdown.
    let rounding = &config.rounding;
    let base_amount = rounding.round(raw_base);
    let tax_amount = rounding.round(raw_tax);
    let service_charge_amount = rounding.round(raw_service_charge);
    let gross_amount = rounding.round(raw_gross);
    let tax_charges = allocator.finalize(tax_amount, rounding);
    let average_daily_amount = rounding.round(raw_selling / occupancy.length_of_stay());

    Ok(AmenityPricingResult {
        code: definition.code.clone(),
        name: definition.name.clone(),
        unit: definition.unit,
        base_amount,
        tax_amount,
        service_charge_amount,
        gross_amount,
        average_daily_amount,
        daily_charges,
        age_category_charges: quantity.categories,
        tax_charges,
        linked_results: Vec::new(),
        plan_included,
    })
}

/// The service charge on a net amount, zero when the hotel charges service
/// inclusively.
fn exclusive_service_charge(base: Decimal, config: &HotelPricingConfig) -> Decimal {
    if config.service_charge_setting == TaxInclusion::Exclusive {
        base * config.service_charge_rate
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::rounding::{RoundingMode, RoundingRule};
    use crate::models::{AgeCategoryPrice, DEFAULT_AGE_CATEGORY, PricingUnit};
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn config(tax: TaxInclusion, service_charge: TaxInclusion) -> HotelPricingConfig {
        HotelPricingConfig {
            currency: "EUR".to_string(),
            tax_setting: tax,
            service_charge_setting: service_charge,
            service_charge_rate: dec("0.10"),
            service_charge_tax_rate: dec("0.19"),
            display_setting: TaxInclusion::Inclusive,
            rounding: RoundingRule {
                mode: RoundingMode::HalfUp,
                places: 2,
            },
        }
    }

    fn occupancy(adults: u32, child_ages: Vec<u32>, pets: u32) -> ReservationOccupancy {
        ReservationOccupancy {
            adults,
            child_ages,
            pets,
            arrival: date("2026-03-01"),
            departure: date("2026-03-04"),
            rooms: 1,
        }
    }

    fn default_price(price: &str) -> AgeCategoryPrice {
        AgeCategoryPrice {
            category: DEFAULT_AGE_CATEGORY.to_string(),
            from_age: None,
            to_age: None,
            price: dec(price),
        }
    }

    fn amenity(code: &str, unit: PricingUnit, price: &str) -> AmenityDefinition {
        AmenityDefinition {
            code: code.to_string(),
            name: code.to_string(),
            unit,
            selling_type: SellingType::Single,
            prices: vec![default_price(price)],
            linked_codes: vec![],
            availability: AvailabilityMode::Active,
            item_count: 1,
        }
    }

    fn combo(code: &str, linked: &[&str]) -> AmenityDefinition {
        AmenityDefinition {
            code: code.to_string(),
            name: code.to_string(),
            unit: PricingUnit::Stay,
            selling_type: SellingType::Combo,
            prices: vec![default_price("0.00")],
            linked_codes: linked.iter().map(|c| c.to_string()).collect(),
            availability: AvailabilityMode::Active,
            item_count: 1,
        }
    }

    fn vat19() -> TaxRule {
        TaxRule {
            code: "VAT19".to_string(),
            name: "VAT 19%".to_string(),
            rate: dec("0.19"),
            valid_from: None,
            valid_to: None,
        }
    }

    fn bindings_for(code: &str, rules: Vec<TaxRule>) -> ServiceTaxBindings {
        let mut bindings = ServiceTaxBindings::new();
        bindings.bind(code, rules);
        bindings
    }

    fn empty_catalog() -> HashMap<String, AmenityDefinition> {
        HashMap::new()
    }

    #[test]
    fn test_exclusive_pricing_stacks_tax_and_service_charge() {
        // 2 adults x 25.00 = 50.00 net per night, 3 nights.
        // Per night: service charge 5.00, tax 50*0.19 + 5*0.19 = 10.45.
        let def = amenity("BRKFST", PricingUnit::Person, "25.00");
        let result = price_amenity(
            &def,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Exclusive),
            &bindings_for("BRKFST", vec![vat19()]),
            &empty_catalog(),
        )
        .unwrap();

        assert_eq!(result.base_amount, dec("150.00"));
        assert_eq!(result.service_charge_amount, dec("15.00"));
        assert_eq!(result.tax_amount, dec("31.35"));
        assert_eq!(result.gross_amount, dec("196.35"));
        assert_eq!(result.average_daily_amount, dec("50.00"));
        assert_eq!(result.daily_charges.len(), 3);
        assert_eq!(result.daily_charges[0].price, dec("50.00"));
        assert_eq!(result.daily_charges[0].count, 2);
        assert_eq!(result.tax_charges.len(), 1);
        assert_eq!(result.tax_charges[0].amount, dec("31.35"));
    }

    #[test]
    fn test_inclusive_pricing_derives_base_from_gross() {
        // Selling 50.00 is the gross. Base = 50 * 0.81 = 40.50,
        // service charge 4.05, tax 50 - 40.50 - 4.05 = 5.45 per night.
        let def = amenity("BRKFST", PricingUnit::Person, "25.00");
        let result = price_amenity(
            &def,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Inclusive, TaxInclusion::Exclusive),
            &bindings_for("BRKFST", vec![vat19()]),
            &empty_catalog(),
        )
        .unwrap();

        assert_eq!(result.gross_amount, dec("150.00"));
        assert_eq!(result.base_amount, dec("121.50"));
        assert_eq!(result.service_charge_amount, dec("12.15"));
        assert_eq!(result.tax_amount, dec("16.35"));
        assert_eq!(result.average_daily_amount, dec("50.00"));
    }

    #[test]
    fn test_inclusive_service_charge_setting_zeroes_service_charge() {
        let def = amenity("BRKFST", PricingUnit::Person, "25.00");
        let result = price_amenity(
            &def,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &bindings_for("BRKFST", vec![vat19()]),
            &empty_catalog(),
        )
        .unwrap();

        assert_eq!(result.service_charge_amount, dec("0.00"));
        // Tax is then 50 * 0.19 = 9.50 per night.
        assert_eq!(result.tax_amount, dec("28.50"));
        assert_eq!(result.gross_amount, dec("178.50"));
    }

    #[test]
    fn test_no_tax_rules_yield_exactly_zero_tax() {
        let def = amenity("BRKFST", PricingUnit::Person, "25.00");
        let result = price_amenity(
            &def,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Exclusive),
            &ServiceTaxBindings::new(),
            &empty_catalog(),
        )
        .unwrap();

        assert_eq!(result.tax_amount, dec("0.00"));
        assert!(result.tax_charges.is_empty());
    }

    #[test]
    fn test_tax_validity_window_limits_taxed_dates() {
        // VAT valid only on the first night of a 3-night stay.
        let mut vat = vat19();
        vat.valid_to = Some(date("2026-03-01"));
        let def = amenity("BRKFST", PricingUnit::Person, "25.00");
        let result = price_amenity(
            &def,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &bindings_for("BRKFST", vec![vat]),
            &empty_catalog(),
        )
        .unwrap();

        // Only the first night carries 9.50 tax.
        assert_eq!(result.tax_amount, dec("9.50"));
        assert_eq!(result.base_amount, dec("150.00"));
        assert_eq!(result.gross_amount, dec("159.50"));
    }

    #[test]
    fn test_multi_code_allocation_conserves_total() {
        let local = TaxRule {
            code: "LOCAL2".to_string(),
            name: "Local levy".to_string(),
            rate: dec("0.02"),
            valid_from: None,
            valid_to: None,
        };
        let def = amenity("DINNER", PricingUnit::Person, "33.33");
        let result = price_amenity(
            &def,
            &occupancy(1, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &bindings_for("DINNER", vec![vat19(), local]),
            &empty_catalog(),
        )
        .unwrap();

        let allocated: Decimal = result.tax_charges.iter().map(|c| c.amount).sum();
        assert_eq!(allocated, result.tax_amount);
        assert_eq!(result.tax_charges.len(), 2);
    }

    #[test]
    fn test_stay_unit_charges_arrival_only() {
        let def = amenity("TRANSFER", PricingUnit::Stay, "60.00");
        let result = price_amenity(
            &def,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &ServiceTaxBindings::new(),
            &empty_catalog(),
        )
        .unwrap();

        assert_eq!(result.daily_charges.len(), 1);
        assert_eq!(result.daily_charges[0].date, date("2026-03-01"));
        assert_eq!(result.base_amount, dec("60.00"));
        // ADR spreads the one-off charge over the stay.
        assert_eq!(result.average_daily_amount, dec("20.00"));
    }

    #[test]
    fn test_plan_included_amenity_follows_included_dates() {
        let def = amenity("BRKFST", PricingUnit::Person, "25.00");
        let included = vec![date("2026-03-02")];
        let result = price_amenity(
            &def,
            &occupancy(2, vec![], 0),
            true,
            &included,
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &ServiceTaxBindings::new(),
            &empty_catalog(),
        )
        .unwrap();

        assert!(result.plan_included);
        assert_eq!(result.daily_charges.len(), 1);
        assert_eq!(result.base_amount, dec("50.00"));
    }

    #[test]
    fn test_pet_surcharge_prices_by_pet_count() {
        let def = amenity("PET_FEE", PricingUnit::Person, "8.00");
        let result = price_amenity(
            &def,
            &occupancy(2, vec![5], 2),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &ServiceTaxBindings::new(),
            &empty_catalog(),
        )
        .unwrap();

        // 2 pets x 8.00 x 3 nights.
        assert_eq!(result.base_amount, dec("48.00"));
        assert_eq!(result.age_category_charges.len(), 1);
        assert_eq!(result.age_category_charges[0].category, DEFAULT_AGE_CATEGORY);
    }

    #[test]
    fn test_combo_totals_are_exact_sums_of_children() {
        let mut catalog = empty_catalog();
        catalog.insert(
            "DINNER".to_string(),
            amenity("DINNER", PricingUnit::Person, "40.00"),
        );
        catalog.insert(
            "SPA".to_string(),
            amenity("SPA", PricingUnit::Stay, "120.00"),
        );
        let parent = combo("ROMANTIC", &["DINNER", "SPA"]);

        let mut bindings = ServiceTaxBindings::new();
        bindings.bind("DINNER", vec![vat19()]);

        let cfg = config(TaxInclusion::Exclusive, TaxInclusion::Exclusive);
        let result = price_amenity(
            &parent,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &cfg,
            &bindings,
            &catalog,
        )
        .unwrap();

        assert_eq!(result.linked_results.len(), 2);
        let child_gross: Decimal = result.linked_results.iter().map(|r| r.gross_amount).sum();
        let child_base: Decimal = result.linked_results.iter().map(|r| r.base_amount).sum();
        let child_tax: Decimal = result.linked_results.iter().map(|r| r.tax_amount).sum();
        assert_eq!(result.gross_amount, child_gross);
        assert_eq!(result.base_amount, child_base);
        assert_eq!(result.tax_amount, child_tax);
        // The parent carries no breakdown of its own.
        assert!(result.daily_charges.is_empty());
        assert!(result.age_category_charges.is_empty());
    }

    #[test]
    fn test_combo_merges_children_tax_codes() {
        let mut catalog = empty_catalog();
        catalog.insert(
            "DINNER".to_string(),
            amenity("DINNER", PricingUnit::Person, "40.00"),
        );
        catalog.insert(
            "WINE".to_string(),
            amenity("WINE", PricingUnit::Item, "30.00"),
        );
        let parent = combo("GOURMET", &["DINNER", "WINE"]);

        let mut bindings = ServiceTaxBindings::new();
        bindings.bind("DINNER", vec![vat19()]);
        bindings.bind("WINE", vec![vat19()]);

        let result = price_amenity(
            &parent,
            &occupancy(1, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &bindings,
            &catalog,
        )
        .unwrap();

        assert_eq!(result.tax_charges.len(), 1);
        assert_eq!(result.tax_charges[0].code, "VAT19");
        assert_eq!(result.tax_charges[0].amount, result.tax_amount);
    }

    #[test]
    fn combo_children_share_included_dates() {
        // Regression pin: linked amenities inherit the parent's
        // plan-included flag and included-dates override.
        let mut catalog = empty_catalog();
        catalog.insert(
            "BRKFST".to_string(),
            amenity("BRKFST", PricingUnit::Person, "25.00"),
        );
        let parent = combo("HB", &["BRKFST"]);
        let included = vec![date("2026-03-02")];

        let result = price_amenity(
            &parent,
            &occupancy(2, vec![], 0),
            true,
            &included,
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &ServiceTaxBindings::new(),
            &catalog,
        )
        .unwrap();

        assert!(result.plan_included);
        let child = &result.linked_results[0];
        assert!(child.plan_included);
        assert_eq!(child.daily_charges.len(), 1);
        assert_eq!(result.base_amount, dec("50.00"));
    }

    #[test]
    fn test_combo_unknown_link_is_hard_error() {
        let parent = combo("ROMANTIC", &["MISSING"]);
        let err = price_amenity(
            &parent,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &ServiceTaxBindings::new(),
            &empty_catalog(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::AmenityNotFound { combo, code }
                if combo == "ROMANTIC" && code == "MISSING"
        ));
    }

    #[test]
    fn test_combo_inactive_link_is_hard_error() {
        let mut catalog = empty_catalog();
        let mut spa = amenity("SPA", PricingUnit::Stay, "120.00");
        spa.availability = AvailabilityMode::Inactive;
        catalog.insert("SPA".to_string(), spa);
        let parent = combo("ROMANTIC", &["SPA"]);

        let err = price_amenity(
            &parent,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &ServiceTaxBindings::new(),
            &catalog,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::AmenityInactive { .. }));
    }

    #[test]
    fn test_combo_cycle_is_hard_error() {
        let mut catalog = empty_catalog();
        catalog.insert("A".to_string(), combo("A", &["B"]));
        catalog.insert("B".to_string(), combo("B", &["A"]));
        let parent = catalog.get("A").unwrap().clone();

        let err = price_amenity(
            &parent,
            &occupancy(2, vec![], 0),
            false,
            &[],
            &config(TaxInclusion::Exclusive, TaxInclusion::Inclusive),
            &ServiceTaxBindings::new(),
            &catalog,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::CircularAmenityReference { .. }));
    }
}
