//! Proportional multi-tax-code allocation.
//!
//! When several tax rules apply to one service, their rates are summed for
//! the tax computation and the combined amount is allocated back to the
//! individual codes by rate share. The last code absorbs the rounding
//! residue so that the allocated amounts always sum to the rounded total.

use rust_decimal::Decimal;

use crate::calculation::rounding::RoundingRule;
use crate::models::{TaxCharge, TaxRule};

/// Sums the rates of the rules valid on the given date's rule subset.
pub fn combined_rate(rules: &[&TaxRule]) -> Decimal {
    rules.iter().map(|r| r.rate).sum()
}

/// Accumulates raw per-code tax shares across the dates of a charge.
#[derive(Debug, Default)]
pub struct TaxAllocator {
    entries: Vec<AllocatedCode>,
}

#[derive(Debug)]
struct AllocatedCode {
    code: String,
    name: String,
    rate: Decimal,
    raw_amount: Decimal,
}

impl TaxAllocator {
    /// Creates an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates one date's combined tax amount across the rules valid on
    /// that date, proportionally by rate share.
    ///
    /// A zero combined rate performs no allocation.
    pub fn accrue(&mut self, valid_rules: &[&TaxRule], tax_amount: Decimal) {
        let total_rate = combined_rate(valid_rules);
        if total_rate.is_zero() {
            return;
        }
        for rule in valid_rules {
            let share = tax_amount * rule.rate / total_rate;
            match self.entries.iter_mut().find(|e| e.code == rule.code) {
                Some(entry) => entry.raw_amount += share,
                None => self.entries.push(AllocatedCode {
                    code: rule.code.clone(),
                    name: rule.name.clone(),
                    rate: rule.rate,
                    raw_amount: share,
                }),
            }
        }
    }

    /// Finalizes the allocation against the independently rounded total.
    ///
    /// Every code's raw share is rounded; the last code is then adjusted by
    /// the residue so that the charges sum to `total_tax` exactly.
    pub fn finalize(self, total_tax: Decimal, rounding: &RoundingRule) -> Vec<TaxCharge> {
        let mut charges: Vec<TaxCharge> = self
            .entries
            .into_iter()
            .map(|entry| TaxCharge {
                code: entry.code,
                name: entry.name,
                rate: entry.rate,
                amount: rounding.round(entry.raw_amount),
            })
            .collect();

        if charges.is_empty() {
            return charges;
        }

        let allocated: Decimal = charges.iter().map(|c| c.amount).sum();
        let residue = total_tax - allocated;
        if !residue.is_zero() {
            let last = charges.len() - 1;
            charges[last].amount += residue;
        }
        charges
    }
}

/// Merges tax charges sharing a code, summing amounts.
///
/// The first occurrence of a code fixes its position, name and rate.
pub fn merge_tax_charges(charges: impl IntoIterator<Item = TaxCharge>) -> Vec<TaxCharge> {
    let mut merged: Vec<TaxCharge> = Vec::new();
    for charge in charges {
        match merged.iter_mut().find(|c| c.code == charge.code) {
            Some(existing) => existing.amount += charge.amount,
            None => merged.push(charge),
        }
    }
    merged
}
