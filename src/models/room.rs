//! Externally-computed room pricing input.
//!
//! The room-rate-per-night computation lives outside this engine; these
//! types carry its output into the aggregation step.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pricing_result::TaxCharge;

/// One night of room pricing, in both the current and the
/// before-adjustment variant.
///
/// The before-adjustment figures reflect the rate plan prior to any
/// manual price override; city-tax percentage units are computed against
/// both variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPriceDay {
    /// The night this price applies to.
    pub date: NaiveDate,
    /// Net room amount for the night.
    pub base_amount: Decimal,
    /// Gross room amount for the night.
    pub gross_amount: Decimal,
    /// Net room amount before adjustment.
    pub base_before_adjustment: Decimal,
    /// Gross room amount before adjustment.
    pub gross_before_adjustment: Decimal,
}

/// The room component of a reservation's pricing, as supplied by the
/// external room/rate-plan pricing component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPricing {
    /// Per-night price series.
    pub daily_rates: Vec<RoomPriceDay>,
    /// Total net room amount.
    pub base_amount: Decimal,
    /// Total gross room amount.
    pub gross_amount: Decimal,
    /// Total tax on the room.
    pub tax_amount: Decimal,
    /// Total service charge on the room.
    pub service_charge_amount: Decimal,
    /// Per-code tax breakdown for the room.
    #[serde(default)]
    pub tax_charges: Vec<TaxCharge>,
    /// Average daily rate reported by the room pricing component.
    pub average_daily_rate: Decimal,
}

impl RoomPricing {
    /// Sums the gross amounts of the per-night series.
    pub fn gross_series_total(&self) -> Decimal {
        self.daily_rates.iter().map(|d| d.gross_amount).sum()
    }

    /// Sums the net amounts of the per-night series.
    pub fn base_series_total(&self) -> Decimal {
        self.daily_rates.iter().map(|d| d.base_amount).sum()
    }

    /// Sums the before-adjustment gross amounts of the per-night series.
    pub fn gross_before_adjustment_total(&self) -> Decimal {
        self.daily_rates
            .iter()
            .map(|d| d.gross_before_adjustment)
            .sum()
    }

    /// Sums the before-adjustment net amounts of the per-night series.
    pub fn base_before_adjustment_total(&self) -> Decimal {
        self.daily_rates
            .iter()
            .map(|d| d.base_before_adjustment)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(date: &str, base: &str, gross: &str) -> RoomPriceDay {
        RoomPriceDay {
            date: NaiveDate::from_str(date).unwrap(),
            base_amount: dec(base),
            gross_amount: dec(gross),
            base_before_adjustment: dec(base),
            gross_before_adjustment: dec(gross),
        }
    }

    #[test]
    fn test_series_totals() {
        let room = RoomPricing {
            daily_rates: vec![
                day("2026-03-01", "84.03", "100.00"),
                day("2026-03-02", "100.84", "120.00"),
            ],
            base_amount: dec("184.87"),
            gross_amount: dec("220.00"),
            tax_amount: dec("35.13"),
            service_charge_amount: dec("0.00"),
            tax_charges: vec![],
            average_daily_rate: dec("110.00"),
        };
        assert_eq!(room.gross_series_total(), dec("220.00"));
        assert_eq!(room.base_series_total(), dec("184.87"));
        assert_eq!(room.gross_before_adjustment_total(), dec("220.00"));
        assert_eq!(room.base_before_adjustment_total(), dec("184.87"));
    }
}
