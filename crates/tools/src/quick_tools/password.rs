//! Password Generator Tool

use async_trait::async_trait;
use serde_json::{json, Value};

use maduraai_core::{
    generate_password, InputSchema, PasswordLimits, PasswordPolicy, PropertySchema, Tool,
    ToolError, ToolOutput, ToolSchema,
};

/// Random password generator tool
pub struct PasswordGeneratorTool {
    limits: PasswordLimits,
    timeout_secs: u64,
}

impl PasswordGeneratorTool {
    pub fn new(limits: PasswordLimits) -> Self {
        Self {
            limits,
            timeout_secs: maduraai_core::traits::DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn policy_from(&self, input: &Value) -> Result<PasswordPolicy, ToolError> {
        let length = match input.get("length") {
            Some(v) if !v.is_null() => v
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| ToolError::invalid_params("length must be a positive integer"))?,
            _ => self.limits.default_length,
        };
        let flag = |name: &str| input.get(name).and_then(|v| v.as_bool()).unwrap_or(true);

        Ok(PasswordPolicy {
            length,
            uppercase: flag("uppercase"),
            lowercase: flag("lowercase"),
            numbers: flag("numbers"),
            symbols: flag("symbols"),
        })
    }
}

impl Default for PasswordGeneratorTool {
    fn default() -> Self {
        Self::new(PasswordLimits::default())
    }
}

#[async_trait]
impl Tool for PasswordGeneratorTool {
    fn name(&self) -> &str {
        "generate_password"
    }

    fn description(&self) -> &str {
        "Generate a random password from the selected character types"
    }

    fn schema(&self) -> ToolSchema {
        let include = |what: &str| {
            PropertySchema::boolean(format!("Include {}", what)).with_default(json!(true))
        };

        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "length",
                    PropertySchema::integer("Password length")
                        .with_range(self.limits.min_length as f64, self.limits.max_length as f64)
                        .with_default(json!(self.limits.default_length)),
                    false,
                )
                .property("uppercase", include("uppercase letters"), false)
                .property("lowercase", include("lowercase letters"), false)
                .property("numbers", include("digits"), false)
                .property("symbols", include("symbols"), false),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let policy = self.policy_from(&input)?;
        let password = generate_password(&policy, &self.limits)?;

        // The password itself is never logged
        tracing::debug!(length = policy.length, "Generated password");

        Ok(ToolOutput::json(json!({
            "password": password,
            "length": policy.length,
            "pool_size": policy.character_pool().len(),
        })))
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maduraai_core::password::NUMBERS;
    use maduraai_core::ErrorCode;

    #[tokio::test]
    async fn test_defaults() {
        let tool = PasswordGeneratorTool::default();
        let output = tool.execute(json!({})).await.unwrap();
        let data = output.as_json().unwrap();

        assert_eq!(data["password"].as_str().unwrap().chars().count(), 12);
        assert_eq!(data["pool_size"], json!(26 + 26 + 10 + 26));
    }

    #[tokio::test]
    async fn test_digits_only() {
        let tool = PasswordGeneratorTool::default();
        let output = tool
            .execute(json!({
                "length": 20,
                "uppercase": false,
                "lowercase": false,
                "symbols": false,
            }))
            .await
            .unwrap();
        let password = output.as_json().unwrap()["password"]
            .as_str()
            .unwrap()
            .to_string();

        assert_eq!(password.len(), 20);
        assert!(password.chars().all(|c| NUMBERS.contains(c)));
    }

    #[tokio::test]
    async fn test_no_character_classes() {
        let tool = PasswordGeneratorTool::default();
        let err = tool
            .execute(json!({
                "uppercase": false,
                "lowercase": false,
                "numbers": false,
                "symbols": false,
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
        assert!(err.message.contains("at least one character type"));
    }

    #[test]
    fn test_length_out_of_range() {
        let tool = PasswordGeneratorTool::default();
        assert!(tool.validate(&json!({"length": 4})).is_err());
        assert!(tool.validate(&json!({"length": 65})).is_err());
        assert!(tool.validate(&json!({"length": 64})).is_ok());
    }
}
