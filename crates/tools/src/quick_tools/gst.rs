//! GST Calculator Tool
//!
//! Splits an amount into base, GST and total at one of the configured slabs,
//! in either direction (adding GST or extracting it).

use async_trait::async_trait;
use serde_json::{json, Value};

use maduraai_config::GstConfig;
use maduraai_core::{
    format_inr, parse_amount, Calculator, GstCalculator, InputSchema, PropertySchema, TaxInput,
    Tool, ToolError, ToolOutput, ToolSchema, MAX_TAX_RATE_PERCENT,
};

/// GST calculator tool
pub struct GstCalculatorTool {
    calculator: GstCalculator,
    default_rate: f64,
    timeout_secs: u64,
}

impl GstCalculatorTool {
    pub fn new(config: GstConfig) -> Self {
        Self {
            calculator: GstCalculator::new(config.rates),
            default_rate: config.default_rate,
            timeout_secs: maduraai_core::traits::DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Numeric `amount` wins over `amount_text`
    fn read_amount(input: &Value) -> Result<Option<f64>, ToolError> {
        if let Some(amount) = input.get("amount").and_then(|v| v.as_f64()) {
            return Ok(Some(amount).filter(|a| *a > 0.0));
        }
        match input.get("amount_text").and_then(|v| v.as_str()) {
            Some(text) => Ok(parse_amount(text)),
            None => Err(ToolError::invalid_params(
                "amount or amount_text is required",
            )),
        }
    }
}

impl Default for GstCalculatorTool {
    fn default() -> Self {
        Self::new(GstConfig::default())
    }
}

#[async_trait]
impl Tool for GstCalculatorTool {
    fn name(&self) -> &str {
        "calculate_gst"
    }

    fn description(&self) -> &str {
        "Add GST to an amount or extract GST from a GST-inclusive amount, with the CGST/SGST split"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property("amount", PropertySchema::number("Amount in rupees"), false)
                .property(
                    "amount_text",
                    PropertySchema::string("Amount as typed, e.g. \"₹1,18,000\""),
                    false,
                )
                .property(
                    "gst_rate",
                    PropertySchema::number(format!(
                        "GST rate (%), one of {:?}",
                        self.calculator.rates()
                    ))
                    .with_range(0.0, MAX_TAX_RATE_PERCENT)
                    .with_default(json!(self.default_rate)),
                    false,
                )
                .property(
                    "inclusive",
                    PropertySchema::boolean("Whether the amount already includes GST")
                        .with_default(json!(false)),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let rate = input
            .get("gst_rate")
            .and_then(|v| v.as_f64())
            .unwrap_or(self.default_rate);

        if !self.calculator.is_supported_rate(rate) {
            return Err(ToolError::invalid_params(format!(
                "gst_rate must be one of {:?}",
                self.calculator.rates()
            )));
        }

        let inclusive = input
            .get("inclusive")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let amount = Self::read_amount(&input)?;
        let result = amount.and_then(|a| {
            let tax_input = if inclusive {
                TaxInput::inclusive(a, rate)
            } else {
                TaxInput::exclusive(a, rate)
            };
            self.calculator.calculate(&tax_input)
        });

        if result.is_none() {
            tracing::debug!(
                calculator = self.calculator.name(),
                ?amount,
                rate,
                inclusive,
                "GST result empty for amount"
            );
        }

        let base = result.map(|r| r.base);
        let gst = result.map(|r| r.tax_amount);
        let total = result.map(|r| r.total);
        let half = result.map(|r| r.half_split_amount);

        Ok(ToolOutput::json(json!({
            "gst_rate_percent": rate,
            "inclusive": inclusive,
            "base_amount": base,
            "gst_amount": gst,
            "total_amount": total,
            "cgst": half,
            "sgst": half,
            "formatted": {
                "base_amount": format_inr(base, 2),
                "gst_amount": format_inr(gst, 2),
                "total_amount": format_inr(total, 2),
                "cgst": format_inr(half, 2),
                "sgst": format_inr(half, 2),
            },
        })))
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}
