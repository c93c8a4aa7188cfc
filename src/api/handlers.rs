//! HTTP request handlers for the pricing engine API.
//!
//! This module contains the handler functions for the quote endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_booking, aggregate_reservation, price_amenity, price_city_tax, rule_applies,
};
use crate::models::{CityTaxRule, ReservationOccupancy, RoomPricing};

use super::request::{
    AmenityQuoteRequest, BookingQuoteRequest, CityTaxQuoteRequest, ReservationQuoteRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quote/amenity", post(amenity_quote_handler))
        .route("/quote/city-tax", post(city_tax_quote_handler))
        .route("/quote/reservation", post(reservation_quote_handler))
        .route("/quote/booking", post(booking_quote_handler))
        .with_state(state)
}

/// Maps a JSON extraction failure to the API error envelope.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
}

/// Handler for the POST /quote/amenity endpoint.
///
/// Prices one amenity from the hotel catalog for an occupancy and stay.
async fn amenity_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<AmenityQuoteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing amenity quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let config = state.config().config();
    let Some(definition) = config.amenity(&request.amenity.code) else {
        warn!(
            correlation_id = %correlation_id,
            amenity = %request.amenity.code,
            "Amenity not found"
        );
        return ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::amenity_not_found(&request.amenity.code),
        }
        .into_response();
    };

    let occupancy: ReservationOccupancy = request.occupancy.into();
    let start_time = Instant::now();
    match price_amenity(
        definition,
        &occupancy,
        request.amenity.plan_included,
        &request.amenity.included_dates,
        config.pricing(),
        config.bindings(),
        config,
    ) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                amenity = %result.code,
                gross_amount = %result.gross_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Amenity quote completed"
            );
            Json(result).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Amenity quote failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for the POST /quote/city-tax endpoint.
///
/// Computes the city-tax breakdown for a stay against the hotel's
/// applicable city-tax rules.
async fn city_tax_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<CityTaxQuoteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing city-tax quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let config = state.config().config();
    let occupancy: ReservationOccupancy = request.occupancy.into();
    let room_days: Vec<_> = request.room_days.into_iter().map(Into::into).collect();
    let rules = applicable_city_tax_rules(config.city_tax_rules(), &occupancy);

    let charges = price_city_tax(&occupancy, &room_days, &rules, config.pricing());
    info!(
        correlation_id = %correlation_id,
        rules = charges.len(),
        "City-tax quote completed"
    );
    Json(charges).into_response()
}

/// Handler for the POST /quote/reservation endpoint.
///
/// Prices the selected amenities and the city tax, then aggregates them
/// with the supplied room pricing into reservation totals.
async fn reservation_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReservationQuoteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reservation quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let config = state.config().config();
    let occupancy: ReservationOccupancy = request.occupancy.into();
    let start_time = Instant::now();

    let mut amenity_results = Vec::with_capacity(request.amenities.len());
    for selection in &request.amenities {
        let Some(definition) = config.amenity(&selection.code) else {
            warn!(
                correlation_id = %correlation_id,
                amenity = %selection.code,
                "Amenity not found"
            );
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::amenity_not_found(&selection.code),
            }
            .into_response();
        };
        match price_amenity(
            definition,
            &occupancy,
            selection.plan_included,
            &selection.included_dates,
            config.pricing(),
            config.bindings(),
            config,
        ) {
            Ok(result) => amenity_results.push(result),
            Err(err) => {
                warn!(correlation_id = %correlation_id, error = %err, "Amenity pricing failed");
                return ApiErrorResponse::from(err).into_response();
            }
        }
    }

    let room: RoomPricing = request.room.into();
    let rules = applicable_city_tax_rules(config.city_tax_rules(), &occupancy);
    let city_taxes = price_city_tax(&occupancy, &room.daily_rates, &rules, config.pricing());

    let result = aggregate_reservation(
        &room,
        amenity_results,
        city_taxes,
        &occupancy,
        config.pricing(),
        &request.payment_terms.into(),
    );

    info!(
        correlation_id = %correlation_id,
        total_gross = %result.total_gross_amount,
        pay_on_confirmation = %result.pay_on_confirmation,
        pay_at_hotel = %result.pay_at_hotel,
        duration_us = start_time.elapsed().as_micros(),
        "Reservation quote completed"
    );
    Json(result).into_response()
}

/// Handler for the POST /quote/booking endpoint.
///
/// Sums previously computed reservation pricings into a booking total.
async fn booking_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<BookingQuoteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing booking quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let config = state.config().config();
    match aggregate_booking(&request.reservations, config) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                reservations = result.reservation_count,
                total_gross = %result.total_gross_amount,
                "Booking quote completed"
            );
            Json(result).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Booking quote failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Filters the hotel's city-tax rules down to those applicable to a stay.
fn applicable_city_tax_rules(
    rules: &[CityTaxRule],
    occupancy: &ReservationOccupancy,
) -> Vec<CityTaxRule> {
    rules
        .iter()
        .filter(|rule| rule_applies(rule, occupancy.arrival, occupancy.departure))
        .cloned()
        .collect()
}
