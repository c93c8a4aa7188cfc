//! Booking-level pricing aggregation.
//!
//! Reduces a non-empty list of reservation pricings into a booking total,
//! grouping the three tax lists by code and re-resolving names and rates
//! from the hotel-level tax lookup.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    BookingPricingResult, HotelTaxLookup, ReservationPricingResult, TaxCharge,
};

use super::city_tax::merge_city_taxes;
use super::tax_allocation::merge_tax_charges;

/// Aggregates reservation pricings into a booking total.
///
/// # Errors
///
/// Returns [`EngineError::EmptyBooking`] when `reservations` is empty; a
/// booking's pricing is undefined with zero reservations.
pub fn aggregate_booking<L: HotelTaxLookup>(
    reservations: &[ReservationPricingResult],
    lookup: &L,
) -> EngineResult<BookingPricingResult> {
    let Some(first) = reservations.first() else {
        return Err(EngineError::EmptyBooking);
    };

    let mut total_base_amount = Decimal::ZERO;
    let mut total_gross_amount = Decimal::ZERO;
    let mut total_tax_amount = Decimal::ZERO;
    let mut total_service_charge_amount = Decimal::ZERO;
    let mut pay_on_confirmation = Decimal::ZERO;
    let mut pay_at_hotel = Decimal::ZERO;
    for reservation in reservations {
        total_base_amount += reservation.total_base_amount;
        total_gross_amount += reservation.total_gross_amount;
        total_tax_amount += reservation.total_tax_amount;
        total_service_charge_amount += reservation.total_service_charge_amount;
        pay_on_confirmation += reservation.pay_on_confirmation;
        pay_at_hotel += reservation.pay_at_hotel;
    }

    let accommodation_taxes = resolve_tax_names(
        merge_tax_charges(
            reservations
                .iter()
                .flat_map(|r| r.accommodation_taxes.iter().cloned()),
        ),
        lookup,
    );
    let extra_service_taxes = resolve_tax_names(
        merge_tax_charges(
            reservations
                .iter()
                .flat_map(|r| r.extra_service_taxes.iter().cloned()),
        ),
        lookup,
    );

    let mut city_taxes = merge_city_taxes(
        reservations
            .iter()
            .flat_map(|r| r.city_taxes.iter().cloned()),
    );
    for charge in &mut city_taxes {
        if let Some(rule) = lookup.city_tax_rule(&charge.code) {
            charge.name = rule.name.clone();
        }
    }

    Ok(BookingPricingResult {
        reservation_count: reservations.len(),
        total_base_amount,
        total_gross_amount,
        total_tax_amount,
        total_service_charge_amount,
        pay_on_confirmation,
        pay_at_hotel,
        accommodation_taxes,
        extra_service_taxes,
        city_taxes,
        currency: first.currency.clone(),
    })
}

/// Re-resolves names and rates from the hotel-level lookup, keeping the
/// entry's own values when the code is unknown.
fn resolve_tax_names<L: HotelTaxLookup>(mut charges: Vec<TaxCharge>, lookup: &L) -> Vec<TaxCharge> {
    for charge in &mut charges {
        if let Some(rule) = lookup.tax_rule(&charge.code) {
            charge.name = rule.name.clone();
            charge.rate = rule.rate;
        }
    }
    charges
}
