//! EMI Calculator Tool
//!
//! Monthly installment, total interest and total payment for a loan.

use async_trait::async_trait;
use serde_json::{json, Value};

use maduraai_core::{
    format_inr, AmortizationCalculator, Calculator, InputSchema, LoanLimits, LoanParameters,
    PropertySchema, Tenure, TenureUnit, Tool, ToolError, ToolOutput, ToolSchema,
};

/// EMI calculator tool
pub struct EmiCalculatorTool {
    calculator: AmortizationCalculator,
    timeout_secs: u64,
}

impl EmiCalculatorTool {
    pub fn new(limits: LoanLimits) -> Self {
        Self {
            calculator: AmortizationCalculator::new(limits),
            timeout_secs: maduraai_core::traits::DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn limits(&self) -> &LoanLimits {
        self.calculator.limits()
    }
}

impl Default for EmiCalculatorTool {
    fn default() -> Self {
        Self::new(LoanLimits::default())
    }
}

#[async_trait]
impl Tool for EmiCalculatorTool {
    fn name(&self) -> &str {
        "calculate_emi"
    }

    fn description(&self) -> &str {
        "Calculate the monthly EMI, total interest and total payment for a loan"
    }

    fn schema(&self) -> ToolSchema {
        let limits = self.limits();

        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "loan_amount",
                    PropertySchema::number("Loan amount in rupees")
                        .with_range(limits.min_principal, limits.max_principal)
                        .with_default(json!(limits.default_principal)),
                    true,
                )
                .property(
                    "interest_rate",
                    PropertySchema::number("Annual interest rate (%)")
                        .with_range(limits.min_rate, limits.max_rate)
                        .with_default(json!(limits.default_rate)),
                    true,
                )
                .property(
                    "tenure",
                    PropertySchema::integer("Loan tenure, in tenure_unit")
                        .with_range(
                            limits.min_tenure(TenureUnit::Months).min(limits.min_tenure_years)
                                as f64,
                            limits.max_tenure(TenureUnit::Months).max(limits.max_tenure_years)
                                as f64,
                        )
                        .with_default(json!(limits.default_tenure_years)),
                    true,
                )
                .property(
                    "tenure_unit",
                    PropertySchema::enum_type(
                        "Unit of tenure",
                        vec!["years".to_string(), "months".to_string()],
                    )
                    .with_default(json!("years")),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let loan_amount = input
            .get("loan_amount")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| ToolError::invalid_params("loan_amount is required"))?;

        let interest_rate = input
            .get("interest_rate")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| ToolError::invalid_params("interest_rate is required"))?;

        let tenure_value = input
            .get("tenure")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| ToolError::invalid_params("tenure is required"))?;

        let unit: TenureUnit = match input.get("tenure_unit").and_then(|v| v.as_str()) {
            Some(s) => s.parse().map_err(ToolError::from)?,
            None => TenureUnit::Years,
        };

        let limits = self.limits();
        let (min, max) = (limits.min_tenure(unit), limits.max_tenure(unit));
        if tenure_value < min as u64 || tenure_value > max as u64 {
            return Err(ToolError::invalid_params(format!(
                "tenure must be between {} and {} {}",
                min, max, unit
            )));
        }
        // Bounded by max_tenure above
        let tenure = Tenure::new(tenure_value as u32, unit);

        let params = LoanParameters::new(loan_amount, interest_rate, tenure);
        let result = self.calculator.calculate(&params);

        if result.is_none() {
            tracing::debug!(
                calculator = self.calculator.name(),
                loan_amount,
                interest_rate,
                tenure = %tenure,
                "EMI not computable for inputs"
            );
        }

        let installment = result.map(|r| r.installment);
        let total_interest = result.map(|r| r.total_interest);
        let total_payment = result.map(|r| r.total_payment);

        Ok(ToolOutput::json(json!({
            "loan_amount": loan_amount,
            "interest_rate_percent": interest_rate,
            "tenure": tenure,
            "tenure_months": tenure.months(),
            "monthly_emi": installment,
            "total_interest": total_interest,
            "total_payment": total_payment,
            "formatted": {
                "loan_amount": format_inr(Some(loan_amount), 0),
                "monthly_emi": format_inr(installment, 0),
                "total_interest": format_inr(total_interest, 0),
                "total_payment": format_inr(total_payment, 0),
            },
        })))
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maduraai_core::ErrorCode;

    fn close(value: &Value, expected: f64) -> bool {
        value
            .as_f64()
            .map(|v| (v - expected).abs() < 0.01)
            .unwrap_or(false)
    }

    #[tokio::test]
    async fn test_default_loan() {
        let tool = EmiCalculatorTool::default();
        let input = json!({
            "loan_amount": 750000,
            "interest_rate": 11,
            "tenure": 3,
        });
        tool.validate(&input).unwrap();

        let output = tool.execute(input).await.unwrap();
        let data = output.as_json().unwrap();

        assert!(close(&data["monthly_emi"], 24_554.04), "{}", data);
        assert!(close(&data["total_payment"], 883_945.36));
        assert!(close(&data["total_interest"], 133_945.36));
        assert_eq!(data["tenure_months"], json!(36));
        assert_eq!(data["formatted"]["loan_amount"], json!("₹ 7,50,000"));
        assert_eq!(data["formatted"]["monthly_emi"], json!("₹ 24,554"));
    }

    #[tokio::test]
    async fn test_months_unit() {
        let tool = EmiCalculatorTool::default();
        let output = tool
            .execute(json!({
                "loan_amount": 100000,
                "interest_rate": 12,
                "tenure": 12,
                "tenure_unit": "months",
            }))
            .await
            .unwrap();
        let data = output.as_json().unwrap();
        assert!(close(&data["monthly_emi"], 8_884.88));
        assert_eq!(data["tenure"], json!({"unit": "months", "value": 12}));
    }

    #[tokio::test]
    async fn test_tenure_out_of_range_for_unit() {
        let tool = EmiCalculatorTool::default();
        // 12 is a valid month count but exceeds the 7-year maximum
        let err = tool
            .execute(json!({
                "loan_amount": 100000,
                "interest_rate": 12,
                "tenure": 12,
                "tenure_unit": "years",
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
    }

    #[test]
    fn test_schema_ranges() {
        let tool = EmiCalculatorTool::default();
        let schema = tool.schema();
        let amount = &schema.input_schema.properties["loan_amount"];
        assert_eq!(amount.minimum, Some(50_000.0));
        assert_eq!(amount.maximum, Some(5_000_000.0));

        assert!(tool
            .validate(&json!({"loan_amount": 10, "interest_rate": 11, "tenure": 3}))
            .is_err());
        assert!(tool
            .validate(&json!({"loan_amount": 750000, "interest_rate": 40, "tenure": 3}))
            .is_err());
        assert!(tool
            .validate(&json!({"loan_amount": 750000, "interest_rate": 11}))
            .is_err());
        assert!(tool
            .validate(&json!({
                "loan_amount": 750000,
                "interest_rate": 11,
                "tenure": 3,
                "tenure_unit": "weeks",
            }))
            .is_err());
    }
}
