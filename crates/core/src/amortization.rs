//! Loan amortization (EMI) calculator
//!
//! EMI = P × r × (1 + r)^n / [(1 + r)^n - 1]
//!
//! Where:
//! - P = principal loan amount
//! - r = monthly interest rate (annual_rate / 12 / 100)
//! - n = tenure in months
//!
//! `(1 + r)^n - 1` is evaluated as `expm1(n · ln1p(r))` so tiny rates keep
//! their precision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::traits::Calculator;
use crate::{Error, Result};

/// Months per year, used by every tenure conversion
pub const MONTHS_PER_YEAR: u32 = 12;

/// Unit in which a tenure is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TenureUnit {
    #[default]
    Years,
    Months,
}

impl TenureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Months => "months",
        }
    }
}

impl fmt::Display for TenureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenureUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "years" | "year" | "y" => Ok(Self::Years),
            "months" | "month" | "m" => Ok(Self::Months),
            other => Err(Error::invalid_input(
                "tenure_unit",
                format!("expected 'years' or 'months', got '{}'", other),
            )),
        }
    }
}

/// Loan tenure in years or months (1 year = 12 months)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Tenure {
    Years(u32),
    Months(u32),
}

impl Tenure {
    pub fn new(value: u32, unit: TenureUnit) -> Self {
        match unit {
            TenureUnit::Years => Self::Years(value),
            TenureUnit::Months => Self::Months(value),
        }
    }

    /// Number of monthly periods
    pub fn months(&self) -> u32 {
        match *self {
            Self::Years(years) => years.saturating_mul(MONTHS_PER_YEAR),
            Self::Months(months) => months,
        }
    }

    pub fn value(&self) -> u32 {
        match *self {
            Self::Years(v) | Self::Months(v) => v,
        }
    }

    pub fn unit(&self) -> TenureUnit {
        match self {
            Self::Years(_) => TenureUnit::Years,
            Self::Months(_) => TenureUnit::Months,
        }
    }

    /// Re-express the tenure in another unit
    ///
    /// Years to months is exact. Months to years rounds to the nearest year
    /// and never goes below one year.
    pub fn to_unit(self, unit: TenureUnit) -> Self {
        match (self, unit) {
            (Self::Years(years), TenureUnit::Months) => {
                Self::Months(years.saturating_mul(MONTHS_PER_YEAR))
            },
            (Self::Months(months), TenureUnit::Years) => {
                let rounded = months.saturating_add(MONTHS_PER_YEAR / 2) / MONTHS_PER_YEAR;
                Self::Years(rounded.max(1))
            },
            (same, _) => same,
        }
    }
}

impl fmt::Display for Tenure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.unit())
    }
}

/// Inputs of one EMI calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Loan amount
    pub principal: f64,
    /// Annual interest rate as percentage (e.g., 11.0 for 11%)
    pub annual_rate_percent: f64,
    pub tenure: Tenure,
}

impl LoanParameters {
    pub fn new(principal: f64, annual_rate_percent: f64, tenure: Tenure) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure,
        }
    }

    pub fn periods(&self) -> i64 {
        i64::from(self.tenure.months())
    }

    pub fn amortize(&self) -> Option<AmortizationResult> {
        compute_amortization(self.principal, self.annual_rate_percent, self.periods())
    }
}

/// EMI calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Fixed monthly installment
    pub installment: f64,
    /// Total interest paid over the tenure
    pub total_interest: f64,
    /// Principal plus total interest
    pub total_payment: f64,
}

impl AmortizationResult {
    pub const ZERO: Self = Self {
        installment: 0.0,
        total_interest: 0.0,
        total_payment: 0.0,
    };
}

/// Compute the EMI, total interest and total payment
///
/// - `principal <= 0`: everything is zero, there is nothing to finance
/// - `periods <= 0`: no installment or interest, the principal is due at once
/// - `annual_rate_percent <= 0`: the principal is divided evenly. Negative
///   rates are deliberately not run through the formula; callers clamp rates
///   into a positive range anyway.
/// - otherwise the standard amortization formula
///
/// Returns `None` when the principal or the installment is not a finite
/// number.
pub fn compute_amortization(
    principal: f64,
    annual_rate_percent: f64,
    periods: i64,
) -> Option<AmortizationResult> {
    if !principal.is_finite() {
        return None;
    }
    if principal <= 0.0 {
        return Some(AmortizationResult::ZERO);
    }

    if periods <= 0 {
        return Some(AmortizationResult {
            installment: 0.0,
            total_interest: 0.0,
            total_payment: principal,
        });
    }

    let n = periods as f64;

    if annual_rate_percent <= 0.0 {
        let installment = principal / n;
        if !installment.is_finite() {
            return None;
        }
        return Some(AmortizationResult {
            installment,
            total_interest: 0.0,
            total_payment: principal,
        });
    }

    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    // growth = (1 + r)^n - 1
    let growth = (n * monthly_rate.ln_1p()).exp_m1();
    let installment = principal * monthly_rate * (growth + 1.0) / growth;

    if !installment.is_finite() {
        return None;
    }

    let total_payment = installment * n;
    Some(AmortizationResult {
        installment,
        total_interest: total_payment - principal,
        total_payment,
    })
}

/// Slider bounds for the EMI calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanLimits {
    pub min_principal: f64,
    pub max_principal: f64,
    pub min_rate: f64,
    pub max_rate: f64,
    pub min_tenure_years: u32,
    pub max_tenure_years: u32,
    pub min_tenure_months: u32,
    pub max_tenure_months: u32,
    pub default_principal: f64,
    pub default_rate: f64,
    pub default_tenure_years: u32,
}

impl Default for LoanLimits {
    fn default() -> Self {
        Self {
            min_principal: 50_000.0,
            max_principal: 5_000_000.0,
            min_rate: 5.0,
            max_rate: 25.0,
            min_tenure_years: 1,
            max_tenure_years: 7,
            min_tenure_months: 1,
            max_tenure_months: 84,
            default_principal: 750_000.0,
            default_rate: 11.0,
            default_tenure_years: 3,
        }
    }
}

impl LoanLimits {
    /// Check that every range is well formed
    pub fn validate(&self) -> Result<()> {
        if !(self.min_principal > 0.0 && self.min_principal <= self.max_principal) {
            return Err(Error::invalid_input(
                "min_principal",
                format!(
                    "must be positive and at most max_principal ({})",
                    self.max_principal
                ),
            ));
        }
        if !(self.min_rate >= 0.0 && self.min_rate <= self.max_rate) {
            return Err(Error::invalid_input(
                "min_rate",
                format!("must be non-negative and at most max_rate ({})", self.max_rate),
            ));
        }
        if self.min_tenure_years == 0 || self.min_tenure_years > self.max_tenure_years {
            return Err(Error::invalid_input(
                "min_tenure_years",
                "must be at least 1 and at most max_tenure_years",
            ));
        }
        if self.min_tenure_months == 0 || self.min_tenure_months > self.max_tenure_months {
            return Err(Error::invalid_input(
                "min_tenure_months",
                "must be at least 1 and at most max_tenure_months",
            ));
        }
        Ok(())
    }

    /// Clamp a principal into range; an unreadable value falls to the minimum
    pub fn clamp_principal(&self, principal: f64) -> f64 {
        if principal.is_nan() {
            return self.min_principal;
        }
        principal.max(self.min_principal).min(self.max_principal)
    }

    pub fn clamp_rate(&self, rate: f64) -> f64 {
        if rate.is_nan() {
            return self.min_rate;
        }
        rate.max(self.min_rate).min(self.max_rate)
    }

    pub fn clamp_tenure(&self, tenure: Tenure) -> Tenure {
        match tenure {
            Tenure::Years(y) => {
                Tenure::Years(y.max(self.min_tenure_years).min(self.max_tenure_years))
            },
            Tenure::Months(m) => {
                Tenure::Months(m.max(self.min_tenure_months).min(self.max_tenure_months))
            },
        }
    }

    pub fn clamp(&self, params: &LoanParameters) -> LoanParameters {
        LoanParameters {
            principal: self.clamp_principal(params.principal),
            annual_rate_percent: self.clamp_rate(params.annual_rate_percent),
            tenure: self.clamp_tenure(params.tenure),
        }
    }

    /// Starting values shown before the user touches a slider
    pub fn default_parameters(&self) -> LoanParameters {
        LoanParameters::new(
            self.default_principal,
            self.default_rate,
            Tenure::Years(self.default_tenure_years),
        )
    }

    /// Upper bound of the tenure slider for a unit
    pub fn max_tenure(&self, unit: TenureUnit) -> u32 {
        match unit {
            TenureUnit::Years => self.max_tenure_years,
            TenureUnit::Months => self.max_tenure_months,
        }
    }

    pub fn min_tenure(&self, unit: TenureUnit) -> u32 {
        match unit {
            TenureUnit::Years => self.min_tenure_years,
            TenureUnit::Months => self.min_tenure_months,
        }
    }
}

/// EMI calculator bound to slider limits
#[derive(Debug, Clone, Default)]
pub struct AmortizationCalculator {
    limits: LoanLimits,
}

impl AmortizationCalculator {
    pub fn new(limits: LoanLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &LoanLimits {
        &self.limits
    }
}

impl Calculator for AmortizationCalculator {
    type Input = LoanParameters;
    type Output = AmortizationResult;

    fn calculate(&self, input: &LoanParameters) -> Option<AmortizationResult> {
        self.limits.clamp(input).amortize()
    }

    fn name(&self) -> &'static str {
        "emi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emi_exact() {
        // P=100000, rate=12%, months=12 → EMI≈8884.88
        let result = compute_amortization(100_000.0, 12.0, 12).unwrap();
        assert!((result.installment - 8884.88).abs() < 0.01, "EMI was {}", result.installment);
        assert!((result.total_interest - 6618.55).abs() < 0.1);
    }

    #[test]
    fn test_emi_default_loan() {
        // 7.5 lakh at 11% for 36 months
        let result = compute_amortization(750_000.0, 11.0, 36).unwrap();
        assert!((result.installment - 24_554.04).abs() < 1.0, "EMI was {}", result.installment);
        assert!((result.total_payment - 883_945.36).abs() < 36.0);
        assert!((result.total_interest - 133_945.36).abs() < 36.0);
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let result = compute_amortization(100_000.0, 0.0, 10).unwrap();
        assert_eq!(result.installment, 10_000.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.total_payment, 100_000.0);
    }

    #[test]
    fn test_zero_principal() {
        assert_eq!(compute_amortization(0.0, 12.0, 12), Some(AmortizationResult::ZERO));
        assert_eq!(compute_amortization(-5.0, 12.0, 12), Some(AmortizationResult::ZERO));
    }

    #[test]
    fn test_zero_periods_due_immediately() {
        let result = compute_amortization(100_000.0, 12.0, 0).unwrap();
        assert_eq!(result.installment, 0.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.total_payment, 100_000.0);
    }

    #[test]
    fn test_non_finite_is_unavailable() {
        assert_eq!(compute_amortization(f64::MAX, 1e300, 12), None);
        assert_eq!(compute_amortization(100_000.0, f64::NAN, 12), None);
        assert_eq!(compute_amortization(f64::INFINITY, 0.0, 12), None);
        assert_eq!(compute_amortization(f64::INFINITY, 12.0, 0), None);
        assert_eq!(compute_amortization(f64::NAN, 12.0, 0), None);
    }

    #[test]
    fn test_tiny_rates_still_accrue_interest() {
        for k in 1..2000 {
            let rate = k as f64 * 1e-11;
            let result = compute_amortization(100_000.0, rate, 12)
                .unwrap_or_else(|| panic!("no result at rate {}", rate));
            assert!(
                result.total_payment > 100_000.0,
                "rate {} gave {:?}",
                rate,
                result
            );
            assert!(result.total_interest > 0.0);
        }
        assert!(compute_amortization(100_000.0, 1e-14, 12).is_some());
    }

    #[test]
    fn test_negative_rate_divides_evenly() {
        let result = compute_amortization(120_000.0, -5.0, 12).unwrap();
        assert_eq!(result.installment, 10_000.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_tenure_months() {
        assert_eq!(Tenure::Years(3).months(), 36);
        assert_eq!(Tenure::Months(30).months(), 30);
    }

    #[test]
    fn test_tenure_unit_toggle() {
        assert_eq!(Tenure::Years(3).to_unit(TenureUnit::Months), Tenure::Months(36));
        assert_eq!(Tenure::Months(30).to_unit(TenureUnit::Years), Tenure::Years(3));
        assert_eq!(Tenure::Months(18).to_unit(TenureUnit::Years), Tenure::Years(2));
        assert_eq!(Tenure::Months(5).to_unit(TenureUnit::Years), Tenure::Years(1));
        assert_eq!(Tenure::Years(2).to_unit(TenureUnit::Years), Tenure::Years(2));
    }

    #[test]
    fn test_tenure_unit_parse() {
        assert_eq!("Years".parse::<TenureUnit>().unwrap(), TenureUnit::Years);
        assert_eq!("months".parse::<TenureUnit>().unwrap(), TenureUnit::Months);
        assert!("weeks".parse::<TenureUnit>().is_err());
    }

    #[test]
    fn test_tenure_serde() {
        let json = serde_json::to_value(Tenure::Years(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "unit": "years", "value": 3 }));
    }

    #[test]
    fn test_loan_parameters_amortize() {
        let params = LoanParameters::new(100_000.0, 12.0, Tenure::Years(1));
        assert_eq!(params.periods(), 12);
        assert_eq!(params.amortize(), compute_amortization(100_000.0, 12.0, 12));
    }

    #[test]
    fn test_limits_clamp() {
        let limits = LoanLimits::default();
        assert_eq!(limits.clamp_principal(10.0), 50_000.0);
        assert_eq!(limits.clamp_principal(9e9), 5_000_000.0);
        assert_eq!(limits.clamp_principal(f64::NAN), 50_000.0);
        assert_eq!(limits.clamp_rate(40.0), 25.0);
        assert_eq!(limits.clamp_tenure(Tenure::Years(10)), Tenure::Years(7));
        assert_eq!(limits.clamp_tenure(Tenure::Months(0)), Tenure::Months(1));
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_limits_validate_rejects_inverted_range() {
        let limits = LoanLimits {
            min_principal: 10.0,
            max_principal: 5.0,
            ..LoanLimits::default()
        };
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_calculator_clamps_before_computing() {
        let calc = AmortizationCalculator::default();
        let raw = LoanParameters::new(1_000.0, 11.0, Tenure::Years(3));
        let clamped = LoanParameters::new(50_000.0, 11.0, Tenure::Years(3));
        assert_eq!(calc.calculate(&raw), clamped.amortize());
        assert_eq!(calc.name(), "emi");
    }

    #[test]
    fn test_default_parameters() {
        let params = LoanLimits::default().default_parameters();
        assert_eq!(params.principal, 750_000.0);
        assert_eq!(params.annual_rate_percent, 11.0);
        assert_eq!(params.tenure, Tenure::Years(3));
    }
}
