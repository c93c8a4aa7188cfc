//! HTTP API module for the pricing engine.
//!
//! This module provides the read-only REST endpoints for quoting amenity,
//! city-tax, reservation and booking pricing.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AmenityQuoteRequest, AmenitySelectionRequest, BookingQuoteRequest, CityTaxQuoteRequest,
    OccupancyRequest, PaymentTermsRequest, ReservationQuoteRequest, RoomPriceDayRequest,
    RoomPricingRequest,
};
pub use response::ApiError;
pub use state::AppState;
