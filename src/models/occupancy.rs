//! Occupancy model for a reservation.
//!
//! This module defines the [`ReservationOccupancy`] struct describing who
//! stays in the room and for which dates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The occupancy of one reservation: guests, pets and the stay window.
///
/// The departure date is exclusive, so a stay from 2026-03-01 to 2026-03-04
/// covers three nights (March 1st, 2nd and 3rd).
///
/// # Example
///
/// ```
/// use stay_pricing::models::ReservationOccupancy;
/// use chrono::NaiveDate;
///
/// let occupancy = ReservationOccupancy {
///     adults: 2,
///     child_ages: vec![5, 9],
///     pets: 0,
///     arrival: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     departure: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
///     rooms: 1,
/// };
/// assert_eq!(occupancy.nights(), 3);
/// assert_eq!(occupancy.persons(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationOccupancy {
    /// Number of adult guests.
    pub adults: u32,
    /// Ages of the child guests, one entry per child.
    #[serde(default)]
    pub child_ages: Vec<u32>,
    /// Number of pets accompanying the guests.
    #[serde(default)]
    pub pets: u32,
    /// Arrival date (first night).
    pub arrival: NaiveDate,
    /// Departure date (exclusive).
    pub departure: NaiveDate,
    /// Number of rooms allocated to this reservation.
    #[serde(default = "default_rooms")]
    pub rooms: u32,
}

fn default_rooms() -> u32 {
    1
}

impl ReservationOccupancy {
    /// Returns the number of nights in the stay.
    ///
    /// A departure on or before the arrival yields zero nights.
    pub fn nights(&self) -> i64 {
        (self.departure - self.arrival).num_days().max(0)
    }

    /// Returns the length of stay used for per-night averages.
    ///
    /// Day-use reservations (zero nights) are floored at one night so that
    /// average-rate divisions stay finite.
    pub fn length_of_stay(&self) -> Decimal {
        Decimal::from(self.nights().max(1))
    }

    /// Returns the total number of persons (adults plus children).
    pub fn persons(&self) -> u32 {
        self.adults + self.child_ages.len() as u32
    }

    /// Returns the night dates of the stay, from arrival up to but not
    /// including departure.
    ///
    /// # Example
    ///
    /// ```
    /// use stay_pricing::models::ReservationOccupancy;
    /// use chrono::NaiveDate;
    ///
    /// let occupancy = ReservationOccupancy {
    ///     adults: 1,
    ///     child_ages: vec![],
    ///     pets: 0,
    ///     arrival: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    ///     departure: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
    ///     rooms: 1,
    /// };
    /// let dates = occupancy.night_dates();
    /// assert_eq!(dates.len(), 2);
    /// assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    /// ```
    pub fn night_dates(&self) -> Vec<NaiveDate> {
        self.arrival
            .iter_days()
            .take_while(|date| *date < self.departure)
            .collect()
    }

    /// Returns true if `date` is one of the stay's night dates.
    pub fn contains_night(&self, date: NaiveDate) -> bool {
        date >= self.arrival && date < self.departure
    }
}
