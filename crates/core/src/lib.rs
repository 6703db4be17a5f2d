//! Core calculators and types for the Open MaduraAI quick tools
//!
//! This crate provides the pieces every other crate builds on:
//! - EMI (loan amortization) and GST calculators
//! - Password generator and quick tools catalogue search
//! - Indian rupee formatting
//! - The `Calculator` and MCP-compatible `Tool` traits
//! - Error types
//!
//! The calculators are pure functions. A result that cannot be computed is
//! `None`, never an error.

pub mod amortization;
pub mod catalog;
pub mod currency;
pub mod error;
pub mod gst;
pub mod password;
pub mod traits;

pub use amortization::{
    compute_amortization, AmortizationCalculator, AmortizationResult, LoanLimits,
    LoanParameters, Tenure, TenureUnit, MONTHS_PER_YEAR,
};
pub use catalog::{QuickTool, ToolCatalog, MAX_SEARCH_RESULTS};
pub use currency::{format_indian, format_inr, RUPEE};
pub use error::{Error, Result};
pub use gst::{
    compute_tax, compute_tax_str, parse_amount, GstCalculator, TaxBreakdown, TaxInput,
    DEFAULT_GST_RATE, GST_SLABS, MAX_TAX_RATE_PERCENT,
};
pub use password::{
    generate_password, generate_password_with, PasswordLimits, PasswordPolicy,
};

pub use traits::{
    Calculator, ContentBlock, ErrorCode, InputSchema, PropertySchema, Tool, ToolError, ToolInput,
    ToolOutput, ToolSchema,
};
