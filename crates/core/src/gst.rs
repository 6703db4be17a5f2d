//! GST calculator
//!
//! Works in both directions: from a tax-exclusive base to the tax-inclusive
//! total, and back. The tax is split evenly into its central and state
//! halves (CGST/SGST).

use serde::{Deserialize, Serialize};

use crate::traits::Calculator;

/// Standard GST slabs (percent)
pub const GST_SLABS: [f64; 4] = [5.0, 12.0, 18.0, 28.0];

/// Slab selected when nothing else is chosen
pub const DEFAULT_GST_RATE: f64 = 18.0;

/// Rates above this are rejected as nonsensical
pub const MAX_TAX_RATE_PERCENT: f64 = 100.0;

/// Inputs of one GST calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxInput {
    pub amount: f64,
    pub rate_percent: f64,
    /// `true` when `amount` already includes the tax
    pub inclusive: bool,
}

impl TaxInput {
    pub fn exclusive(amount: f64, rate_percent: f64) -> Self {
        Self {
            amount,
            rate_percent,
            inclusive: false,
        }
    }

    pub fn inclusive(amount: f64, rate_percent: f64) -> Self {
        Self {
            amount,
            rate_percent,
            inclusive: true,
        }
    }
}

/// GST calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Amount without GST
    pub base: f64,
    pub tax_amount: f64,
    /// Amount with GST
    pub total: f64,
    /// CGST and SGST each
    pub half_split_amount: f64,
    pub rate_percent: f64,
    pub inclusive: bool,
}

fn is_sane_rate(rate_percent: f64) -> bool {
    rate_percent.is_finite() && (0.0..=MAX_TAX_RATE_PERCENT).contains(&rate_percent)
}

/// Compute base, tax, total and the half split
///
/// Returns `None` for a non-positive or non-finite amount (the empty state)
/// and for a negative, non-finite or absurd rate.
pub fn compute_tax(amount: f64, rate_percent: f64, inclusive: bool) -> Option<TaxBreakdown> {
    if !amount.is_finite() || amount <= 0.0 || !is_sane_rate(rate_percent) {
        return None;
    }

    let (base, tax_amount, total) = if inclusive {
        let total = amount;
        let base = total / (1.0 + rate_percent / 100.0);
        (base, total - base, total)
    } else {
        let base = amount;
        let tax = base * (rate_percent / 100.0);
        (base, tax, base + tax)
    };

    if !(base.is_finite() && tax_amount.is_finite() && total.is_finite()) {
        return None;
    }

    Some(TaxBreakdown {
        base,
        tax_amount,
        total,
        half_split_amount: tax_amount / 2.0,
        rate_percent,
        inclusive,
    })
}

/// Read an amount typed into a free-form text field
///
/// Everything except digits and `.` is dropped, then the longest numeric
/// prefix is read, so `"₹ 1,500"` is `1500` and `"1.2.3"` is `1.2`.
/// Returns `None` when nothing numeric remains or the value is not positive.
pub fn parse_amount(input: &str) -> Option<f64> {
    let sanitized: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (idx, c) in sanitized.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        } else {
            seen_digit = true;
        }
        end = idx + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    let value: f64 = sanitized[..end].parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// [`compute_tax`] over free-form text input
pub fn compute_tax_str(input: &str, rate_percent: f64, inclusive: bool) -> Option<TaxBreakdown> {
    parse_amount(input).and_then(|amount| compute_tax(amount, rate_percent, inclusive))
}

/// GST calculator restricted to a set of permitted slabs
#[derive(Debug, Clone)]
pub struct GstCalculator {
    rates: Vec<f64>,
}

impl GstCalculator {
    pub fn new(rates: Vec<f64>) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    pub fn is_supported_rate(&self, rate_percent: f64) -> bool {
        self.rates.iter().any(|r| (r - rate_percent).abs() < 1e-9)
    }
}

impl Default for GstCalculator {
    fn default() -> Self {
        Self::new(GST_SLABS.to_vec())
    }
}

impl Calculator for GstCalculator {
    type Input = TaxInput;
    type Output = TaxBreakdown;

    fn calculate(&self, input: &TaxInput) -> Option<TaxBreakdown> {
        if !self.is_supported_rate(input.rate_percent) {
            return None;
        }
        compute_tax(input.amount, input.rate_percent, input.inclusive)
    }

    fn name(&self) -> &'static str {
        "gst"
    }
}
