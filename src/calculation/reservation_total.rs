//! Reservation-level pricing aggregation.
//!
//! Combines externally-computed room pricing with amenity and city-tax
//! results into one reservation's totals, applies the inclusive/exclusive
//! average-daily-rate split, and reconciles the two payment-term buckets
//! to the cent against the gross total.

use rust_decimal::Decimal;

use crate::config::{HotelPricingConfig, TaxInclusion};
use crate::models::{
    AmenityPricingResult, CityTaxCharge, CityTaxChargeMethod, ReservationOccupancy,
    ReservationPricingResult, RoomPricing, TaxCharge,
};

use super::tax_allocation::merge_tax_charges;

/// Residuals at or below this absolute value are left uncorrected by the
/// payment-term reconciliation.
///
/// The value is currency-unit-agnostic and deliberately not derived from
/// the hotel's rounding configuration.
pub const RECONCILIATION_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// The payment-term split of a reservation's charged amount.
///
/// The two rates are fractions that sum to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTerms {
    /// Fraction of the charged gross due with the booking payment.
    pub pay_on_confirmation_rate: Decimal,
    /// Fraction of the charged gross due at the hotel.
    pub pay_at_hotel_rate: Decimal,
}

/// Aggregates room, amenity and city-tax pricing into reservation totals.
///
/// Amenities flagged as plan-included are carried on the result but
/// excluded from every total, since their value is already inside the
/// room's selling price.
pub fn aggregate_reservation(
    room: &RoomPricing,
    amenities: Vec<AmenityPricingResult>,
    city_taxes: Vec<CityTaxCharge>,
    occupancy: &ReservationOccupancy,
    config: &HotelPricingConfig,
    terms: &PaymentTerms,
) -> ReservationPricingResult {
    let rounding = &config.rounding;

    let mut total_base_amount = room.base_amount;
    let mut total_gross_amount = room.gross_amount;
    let mut total_tax_amount = room.tax_amount;
    let mut total_service_charge_amount = room.service_charge_amount;
    for amenity in amenities.iter().filter(|a| !a.plan_included) {
        total_base_amount += amenity.base_amount;
        total_gross_amount += amenity.gross_amount;
        total_tax_amount += amenity.tax_amount;
        total_service_charge_amount += amenity.service_charge_amount;
    }

    let length_of_stay = occupancy.length_of_stay();
    let average_daily_rate = rounding.round(total_gross_amount / length_of_stay);
    let displayed_total = match config.display_setting {
        TaxInclusion::Inclusive => total_gross_amount,
        TaxInclusion::Exclusive => total_base_amount,
    };
    let average_daily_rate_by_setting = rounding.round(displayed_total / length_of_stay);

    let city_tax_total: Decimal = city_taxes.iter().map(|c| c.amount).sum();
    let uncharged_city_tax: Decimal = city_taxes
        .iter()
        .filter(|c| c.charge_method == CityTaxChargeMethod::PayAtHotel)
        .map(|c| c.amount)
        .sum();

    // Each payment bucket is rounded independently, so their sum can
    // drift from the gross total by up to one rounding unit.
    let charged_gross = total_gross_amount - city_tax_total;
    let mut pay_on_confirmation = rounding.round(charged_gross * terms.pay_on_confirmation_rate);
    let mut pay_at_hotel =
        rounding.round(charged_gross * terms.pay_at_hotel_rate) + uncharged_city_tax;

    let residual = total_gross_amount - (pay_on_confirmation + pay_at_hotel);
    if residual.abs() > RECONCILIATION_TOLERANCE {
        if residual < Decimal::ZERO {
            pay_on_confirmation += residual;
        } else {
            pay_at_hotel += residual;
        }
    }

    let accommodation_taxes = room.tax_charges.clone();
    let extra_service_taxes = merge_tax_charges(
        amenities
            .iter()
            .filter(|a| !a.plan_included)
            .flat_map(|a| a.tax_charges.iter().cloned()),
    );
    let tax_totals = merge_tax_charges(
        accommodation_taxes
            .iter()
            .cloned()
            .chain(extra_service_taxes.iter().cloned()),
    );

    ReservationPricingResult {
        amenities,
        city_taxes,
        total_base_amount,
        total_gross_amount,
        total_tax_amount,
        total_service_charge_amount,
        average_daily_rate,
        average_daily_rate_by_setting,
        pay_on_confirmation,
        pay_at_hotel,
        accommodation_taxes,
        extra_service_taxes,
        tax_totals,
        currency: config.currency.clone(),
    }
}
