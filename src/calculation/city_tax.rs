//! City-tax computation.
//!
//! Computes municipal occupancy tax for a reservation across a set of
//! applicable city-tax rules, each with its own charge unit, and merges
//! duplicate tax codes across computations.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::config::HotelPricingConfig;
use crate::models::{
    CityTaxCharge, CityTaxRule, CityTaxUnit, ReservationOccupancy, RoomPriceDay,
};

use super::rounding::{RoundingMode, RoundingRule};

/// Percent rates are converted to fractions at a fixed 4-decimal
/// precision before multiplying.
const PERCENT_FRACTION_RULE: RoundingRule = RoundingRule {
    mode: RoundingMode::HalfUp,
    places: 4,
};

/// Computes the city-tax breakdown for a reservation.
///
/// Every rule yields one [`CityTaxCharge`] with the amount computed from
/// the current room prices and the before-adjustment variant. The rule
/// list is expected to be pre-filtered with [`rule_applies`].
///
/// The validity window clips the night count for the
/// PER_PERSON_PER_NIGHT unit only; all other units use the full
/// reservation range. Room-price lookups always use the full range.
pub fn price_city_tax(
    occupancy: &ReservationOccupancy,
    room_days: &[RoomPriceDay],
    rules: &[CityTaxRule],
    config: &HotelPricingConfig,
) -> Vec<CityTaxCharge> {
    let gross_total: Decimal = room_days.iter().map(|d| d.gross_amount).sum();
    let base_total: Decimal = room_days.iter().map(|d| d.base_amount).sum();
    let gross_before: Decimal = room_days.iter().map(|d| d.gross_before_adjustment).sum();
    let base_before: Decimal = room_days.iter().map(|d| d.base_before_adjustment).sum();

    rules
        .iter()
        .map(|rule| {
            let nights = Decimal::from(charged_nights(rule, occupancy));
            let amount = rule_amount(rule, occupancy, nights, gross_total, base_total);
            let amount_before = rule_amount(rule, occupancy, nights, gross_before, base_before);
            CityTaxCharge {
                code: rule.code.clone(),
                name: rule.name.clone(),
                amount: config.rounding.round(amount),
                amount_before_adjustment: config.rounding.round(amount_before),
                charge_method: rule.charge_method,
            }
        })
        .collect()
}

/// The accumulated amount for one rule: the adult component plus one
/// repetition per child for the units that charge children.
fn rule_amount(
    rule: &CityTaxRule,
    occupancy: &ReservationOccupancy,
    nights: Decimal,
    gross_room: Decimal,
    base_room: Decimal,
) -> Decimal {
    let rooms = Decimal::from(occupancy.rooms);
    let adults = Decimal::from(occupancy.adults);

    let mut total = unit_amount(rule, adults, nights, rooms, gross_room, base_room);
    if rule.unit.charges_children() {
        for _ in &occupancy.child_ages {
            total += unit_amount(rule, Decimal::ONE, nights, rooms, gross_room, base_room);
        }
    }
    total
}

/// The unit-specific formula for a given person count.
fn unit_amount(
    rule: &CityTaxRule,
    people: Decimal,
    nights: Decimal,
    rooms: Decimal,
    gross_room: Decimal,
    base_room: Decimal,
) -> Decimal {
    match rule.unit {
        CityTaxUnit::FixedPerRoom => rooms * rule.amount,
        CityTaxUnit::PercentOfGrossRoom => gross_room * percent_fraction(rule.amount),
        CityTaxUnit::PercentOfNetRoom => base_room * percent_fraction(rule.amount),
        CityTaxUnit::PerPersonPerNight => people * nights * rule.amount,
        CityTaxUnit::PerPersonPerStayFixed => people * rule.amount,
        CityTaxUnit::PerRoomPerNight => rooms * nights * rule.amount,
    }
}

/// Converts a percent rate (5 = 5%) to a fraction, pre-rounded to 4
/// decimal places.
fn percent_fraction(rate: Decimal) -> Decimal {
    PERCENT_FRACTION_RULE.round(rate / Decimal::ONE_HUNDRED)
}

/// The night count a rule charges: the stay clipped to the validity
/// window for PER_PERSON_PER_NIGHT, the full stay for every other unit.
fn charged_nights(rule: &CityTaxRule, occupancy: &ReservationOccupancy) -> i64 {
    if rule.unit != CityTaxUnit::PerPersonPerNight {
        return occupancy.nights();
    }

    let from = match rule.valid_from {
        Some(valid_from) if valid_from > occupancy.arrival => valid_from,
        _ => occupancy.arrival,
    };
    let to = match rule.valid_to {
        Some(valid_to) => {
            // valid_to is the last chargeable night, so the exclusive end
            // of the window is the following day.
            let end = valid_to
                .checked_add_days(Days::new(1))
                .unwrap_or(occupancy.departure);
            end.min(occupancy.departure)
        }
        None => occupancy.departure,
    };
    (to - from).num_days().max(0)
}

/// Decides whether a city-tax rule applies to a reservation date range.
///
/// A rule without a validity window always applies; a rule with only a
/// valid-to applies when the window has not ended before the range starts.
/// Otherwise valid-from is compared against the range end for per-night
/// units and against the range start for all other units.
pub fn rule_applies(rule: &CityTaxRule, range_start: NaiveDate, range_end: NaiveDate) -> bool {
    match (rule.valid_from, rule.valid_to) {
        (None, None) => true,
        (None, Some(valid_to)) => valid_to >= range_start,
        (Some(valid_from), valid_to) => {
            let pivot = if rule.unit.is_per_night() {
                range_end
            } else {
                range_start
            };
            valid_from <= pivot && valid_to.is_none_or(|to| to >= range_start)
        }
    }
}

/// Merges city-tax charges sharing a code, summing both amount variants.
///
/// Entries with an empty code are dropped.
pub fn merge_city_taxes(charges: impl IntoIterator<Item = CityTaxCharge>) -> Vec<CityTaxCharge> {
    let mut merged: Vec<CityTaxCharge> = Vec::new();
    for charge in charges {
        if charge.code.is_empty() {
            continue;
        }
        match merged.iter_mut().find(|c| c.code == charge.code) {
            Some(existing) => {
                existing.amount += charge.amount;
                existing.amount_before_adjustment += charge.amount_before_adjustment;
            }
            None => merged.push(charge),
        }
    }
    merged
}
