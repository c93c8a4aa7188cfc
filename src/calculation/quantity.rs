//! Quantity resolution and age-category splitting for amenity pricing.
//!
//! This module determines how many units of an amenity are charged per
//! applicable date and at which age-category prices.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AgeCategoryCharge, AmenityDefinition, PricingUnit, ReservationOccupancy};

/// The resolved charge quantity for one amenity.
#[derive(Debug, Clone)]
pub struct QuantityResolution {
    /// Total charged unit count per applicable date.
    pub count: u32,
    /// The per-age-category split of the count.
    pub categories: Vec<AgeCategoryCharge>,
    /// The selling price per applicable date, summed across categories.
    pub per_date_price: Decimal,
}

/// Resolves the charged quantity and age-category split for an amenity.
///
/// The unit count follows the pricing unit: ITEM charges the definition's
/// fixed count, ROOM/NIGHT/STAY charge one unit per applicable date, and
/// PERSON-family units charge adults plus children (or the pet count for
/// pet surcharges, which also skip category splitting entirely).
///
/// For PERSON-family units each child is matched to at most one
/// non-DEFAULT age category; adults and unmatched children are priced at
/// the DEFAULT rate.
///
/// # Errors
///
/// Returns [`EngineError::MissingDefaultAgeCategory`] when the amenity's
/// price list has no DEFAULT entry.
pub fn resolve_quantity(
    definition: &AmenityDefinition,
    occupancy: &ReservationOccupancy,
) -> EngineResult<QuantityResolution> {
    let default_price =
        definition
            .default_price()
            .ok_or_else(|| EngineError::MissingDefaultAgeCategory {
                code: definition.code.clone(),
            })?;

    let pet_surcharge = definition.is_pet_surcharge();
    let count = match definition.unit {
        PricingUnit::Item => definition.item_count,
        PricingUnit::Room | PricingUnit::Night | PricingUnit::Stay => 1,
        PricingUnit::Person | PricingUnit::PerPersonPerRoom => {
            if pet_surcharge {
                occupancy.pets
            } else {
                occupancy.persons()
            }
        }
    };

    let mut categories = Vec::new();
    let mut assigned = 0u32;

    if definition.unit.is_person_based() && !pet_surcharge {
        let mut taken = vec![false; occupancy.child_ages.len()];
        for band in definition.prices.iter().filter(|p| !p.is_default()) {
            let mut band_count = 0u32;
            for (index, age) in occupancy.child_ages.iter().enumerate() {
                if !taken[index] && band.matches_age(*age) {
                    taken[index] = true;
                    band_count += 1;
                }
            }
            if band_count > 0 {
                categories.push(AgeCategoryCharge {
                    category: band.category.clone(),
                    count: band_count,
                    unit_price: band.price,
                    total: band.price * Decimal::from(band_count),
                });
                assigned += band_count;
            }
        }
    }

    let remaining = count.saturating_sub(assigned);
    if remaining > 0 {
        categories.push(AgeCategoryCharge {
            category: default_price.category.clone(),
            count: remaining,
            unit_price: default_price.price,
            total: default_price.price * Decimal::from(remaining),
        });
    }

    let per_date_price = categories.iter().map(|c| c.total).sum();

    Ok(QuantityResolution {
        count,
        categories,
        per_date_price,
    })
}
