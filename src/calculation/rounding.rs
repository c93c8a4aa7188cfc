//! Currency rounding policy.
//!
//! Every monetary amount produced by the engine passes through a
//! [`RoundingRule`], a rounding mode plus a decimal-place count configured
//! per hotel. All arithmetic uses `rust_decimal::Decimal`; binary floating
//! point never enters a money path.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The rounding mode applied to monetary amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round away from zero.
    Up,
    /// Round toward zero.
    Down,
    /// Round to nearest; ties away from zero.
    HalfUp,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        }
    }
}

/// A hotel's rounding configuration: mode plus decimal places.
///
/// # Example
///
/// ```
/// use stay_pricing::calculation::{RoundingMode, RoundingRule};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rule = RoundingRule { mode: RoundingMode::HalfUp, places: 2 };
/// let rounded = rule.round(Decimal::from_str("10.005").unwrap());
/// assert_eq!(rounded, Decimal::from_str("10.01").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundingRule {
    /// The rounding mode.
    pub mode: RoundingMode,
    /// The number of decimal places amounts are rounded to.
    pub places: u32,
}

impl RoundingRule {
    /// Rounds `amount` to this rule's decimal places.
    ///
    /// The result always carries exactly `places` decimal digits so that
    /// serialized amounts match the currency's minor-unit format.
    pub fn round(&self, amount: Decimal) -> Decimal {
        let mut rounded = amount.round_dp_with_strategy(self.places, self.mode.strategy());
        rounded.rescale(self.places);
        rounded
    }
}
