//! Request types for the pricing engine API.
//!
//! This module defines the JSON request structures for the quote
//! endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::PaymentTerms;
use crate::models::{
    ReservationOccupancy, ReservationPricingResult, RoomPriceDay, RoomPricing, TaxCharge,
};

/// Occupancy information in a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyRequest {
    /// Number of adult guests.
    pub adults: u32,
    /// Ages of the child guests.
    #[serde(default)]
    pub child_ages: Vec<u32>,
    /// Number of pets.
    #[serde(default)]
    pub pets: u32,
    /// Arrival date (first night).
    pub arrival: NaiveDate,
    /// Departure date (exclusive).
    pub departure: NaiveDate,
    /// Number of rooms allocated to the reservation.
    #[serde(default = "default_rooms")]
    pub rooms: u32,
}

fn default_rooms() -> u32 {
    1
}

impl From<OccupancyRequest> for ReservationOccupancy {
    fn from(req: OccupancyRequest) -> Self {
        ReservationOccupancy {
            adults: req.adults,
            child_ages: req.child_ages,
            pets: req.pets,
            arrival: req.arrival,
            departure: req.departure,
            rooms: req.rooms,
        }
    }
}

/// One selected amenity in a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmenitySelectionRequest {
    /// The amenity code to price.
    pub code: String,
    /// Whether the amenity is already included in the room's selling price.
    #[serde(default)]
    pub plan_included: bool,
    /// Included-dates override for plan-included amenities.
    #[serde(default)]
    pub included_dates: Vec<NaiveDate>,
}

/// Request body for the `/quote/amenity` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmenityQuoteRequest {
    /// The amenity to price.
    pub amenity: AmenitySelectionRequest,
    /// The occupancy to price for.
    pub occupancy: OccupancyRequest,
}

/// One night of room pricing in a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPriceDayRequest {
    /// The night this price applies to.
    pub date: NaiveDate,
    /// Net room amount for the night.
    pub base_amount: Decimal,
    /// Gross room amount for the night.
    pub gross_amount: Decimal,
    /// Net room amount before adjustment; defaults to the current value.
    #[serde(default)]
    pub base_before_adjustment: Option<Decimal>,
    /// Gross room amount before adjustment; defaults to the current value.
    #[serde(default)]
    pub gross_before_adjustment: Option<Decimal>,
}

impl From<RoomPriceDayRequest> for RoomPriceDay {
    fn from(req: RoomPriceDayRequest) -> Self {
        RoomPriceDay {
            date: req.date,
            base_amount: req.base_amount,
            gross_amount: req.gross_amount,
            base_before_adjustment: req.base_before_adjustment.unwrap_or(req.base_amount),
            gross_before_adjustment: req.gross_before_adjustment.unwrap_or(req.gross_amount),
        }
    }
}

/// Request body for the `/quote/city-tax` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityTaxQuoteRequest {
    /// The occupancy to price for.
    pub occupancy: OccupancyRequest,
    /// The room price series for the stay.
    pub room_days: Vec<RoomPriceDayRequest>,
}

/// Externally-computed room pricing in a reservation quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPricingRequest {
    /// Per-night price series.
    pub daily_rates: Vec<RoomPriceDayRequest>,
    /// Total net room amount.
    pub base_amount: Decimal,
    /// Total gross room amount.
    pub gross_amount: Decimal,
    /// Total tax on the room.
    pub tax_amount: Decimal,
    /// Total service charge on the room.
    #[serde(default)]
    pub service_charge_amount: Decimal,
    /// Per-code tax breakdown for the room.
    #[serde(default)]
    pub tax_charges: Vec<TaxCharge>,
    /// Average daily rate reported by the room pricing component.
    pub average_daily_rate: Decimal,
}

impl From<RoomPricingRequest> for RoomPricing {
    fn from(req: RoomPricingRequest) -> Self {
        RoomPricing {
            daily_rates: req.daily_rates.into_iter().map(Into::into).collect(),
            base_amount: req.base_amount,
            gross_amount: req.gross_amount,
            tax_amount: req.tax_amount,
            service_charge_amount: req.service_charge_amount,
            tax_charges: req.tax_charges,
            average_daily_rate: req.average_daily_rate,
        }
    }
}

/// Payment-term rates in a reservation quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTermsRequest {
    /// Fraction of the charged gross due with the booking payment.
    pub pay_on_confirmation_rate: Decimal,
    /// Fraction of the charged gross due at the hotel.
    pub pay_at_hotel_rate: Decimal,
}

impl From<PaymentTermsRequest> for PaymentTerms {
    fn from(req: PaymentTermsRequest) -> Self {
        PaymentTerms {
            pay_on_confirmation_rate: req.pay_on_confirmation_rate,
            pay_at_hotel_rate: req.pay_at_hotel_rate,
        }
    }
}

/// Request body for the `/quote/reservation` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationQuoteRequest {
    /// The occupancy to price for.
    pub occupancy: OccupancyRequest,
    /// Externally-computed room pricing.
    pub room: RoomPricingRequest,
    /// The amenities selected on the reservation.
    #[serde(default)]
    pub amenities: Vec<AmenitySelectionRequest>,
    /// The payment-term split.
    pub payment_terms: PaymentTermsRequest,
}

/// Request body for the `/quote/booking` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingQuoteRequest {
    /// The reservation pricings to aggregate.
    pub reservations: Vec<ReservationPricingResult>,
}
