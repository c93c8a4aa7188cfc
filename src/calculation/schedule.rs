//! Applicable-date resolution for amenity charges.
//!
//! Determines which calendar dates an amenity is charged on: every night
//! for nightly units, the arrival date for stay-level units, or the
//! sales-plan included-dates override.

use chrono::NaiveDate;

use crate::models::{PricingUnit, ReservationOccupancy};

/// Resolves the dates an amenity charge applies to.
///
/// Sales-plan-included amenities are governed by the included-dates list,
/// filtered to the stay range. Otherwise nightly units (NIGHT and the
/// PERSON family) charge on every night date, and ITEM/STAY/ROOM units
/// charge once on the arrival date.
pub fn applicable_dates(
    unit: PricingUnit,
    occupancy: &ReservationOccupancy,
    plan_included: bool,
    included_dates: &[NaiveDate],
) -> Vec<NaiveDate> {
    if plan_included {
        return included_dates
            .iter()
            .copied()
            .filter(|date| occupancy.contains_night(*date))
            .collect();
    }

    if unit.is_nightly() {
        occupancy.night_dates()
    } else {
        vec![occupancy.arrival]
    }
}
