//! Calculator trait for the quick tools
//!
//! Every calculator is a pure, synchronous function of its input. A result
//! that cannot be computed for the given input (empty amount, numeric
//! overflow) is reported as `None` rather than as an error or a NaN.
//!
//! # Example
//!
//! ```ignore
//! use maduraai_core::{AmortizationCalculator, Calculator, LoanParameters, Tenure};
//!
//! let calc = AmortizationCalculator::default();
//! let params = LoanParameters::new(750_000.0, 11.0, Tenure::Years(3));
//! let result = calc.calculate(&params);
//! ```

/// Configured calculator
///
/// Implementations carry their configured bounds (loan limits, permitted GST
/// slabs) and apply them before delegating to the free functions in
/// [`crate::amortization`] and [`crate::gst`].
pub trait Calculator: Send + Sync {
    /// Input value object, recreated on every input change
    type Input;

    /// Derived result
    type Output;

    /// Compute the result, or `None` when it is unavailable for this input
    fn calculate(&self, input: &Self::Input) -> Option<Self::Output>;

    /// Short machine name used in logs and tool listings
    fn name(&self) -> &'static str;
}
