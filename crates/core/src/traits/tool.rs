//! MCP-compatible tool interface
//!
//! Tools take a JSON object, validate it against their declared input schema
//! and return content blocks. Errors carry JSON-RPC error codes so they can
//! be forwarded to MCP clients unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Default timeout for tool execution (seconds)
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Raw tool input
pub type ToolInput = Value;

/// JSON-RPC error codes used by tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    Timeout,
}

impl ErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::Timeout => -32001,
        }
    }
}

/// Tool execution error
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ToolError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MethodNotFound, message)
    }

    pub fn timeout(tool: &str, secs: u64) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Tool '{}' timed out after {}s", tool, secs),
        )
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<crate::Error> for ToolError {
    fn from(err: crate::Error) -> Self {
        ToolError::invalid_params(err.to_string())
    }
}

/// Content block returned by a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
    Json { data: Value },
}

/// Tool output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn json(data: Value) -> Self {
        Self {
            content: vec![ContentBlock::Json { data }],
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// First JSON block, if any
    pub fn as_json(&self) -> Option<&Value> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Json { data } => Some(data),
            _ => None,
        })
    }
}

/// JSON schema for a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub prop_type: String,
    pub description: String,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl PropertySchema {
    fn of_type(prop_type: &str, description: impl Into<String>) -> Self {
        Self {
            prop_type: prop_type.to_string(),
            description: description.into(),
            enum_values: None,
            minimum: None,
            maximum: None,
            default: None,
        }
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::of_type("string", description)
    }

    pub fn number(description: impl Into<String>) -> Self {
        Self::of_type("number", description)
    }

    pub fn integer(description: impl Into<String>) -> Self {
        Self::of_type("integer", description)
    }

    pub fn boolean(description: impl Into<String>) -> Self {
        Self::of_type("boolean", description)
    }

    pub fn enum_type(description: impl Into<String>, values: Vec<String>) -> Self {
        let mut schema = Self::of_type("string", description);
        schema.enum_values = Some(values);
        schema
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.minimum = Some(min);
        self.maximum = Some(max);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// JSON schema for a tool's input object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl InputSchema {
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    pub fn property(mut self, name: &str, schema: PropertySchema, required: bool) -> Self {
        self.properties.insert(name.to_string(), schema);
        if required {
            self.required.push(name.to_string());
        }
        self
    }
}

/// Tool schema as advertised to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

/// Validate one property value against its schema
pub fn validate_property(name: &str, schema: &PropertySchema, value: &Value) -> Result<(), ToolError> {
    let type_ok = match schema.prop_type.as_str() {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        _ => true,
    };
    if !type_ok {
        return Err(ToolError::invalid_params(format!(
            "{} must be of type {}",
            name, schema.prop_type
        )));
    }

    if let Some(allowed) = &schema.enum_values {
        let matches = value
            .as_str()
            .map(|s| allowed.iter().any(|a| a.eq_ignore_ascii_case(s)))
            .unwrap_or(false);
        if !matches {
            return Err(ToolError::invalid_params(format!(
                "{} must be one of: {}",
                name,
                allowed.join(", ")
            )));
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = schema.minimum {
            if n < min {
                return Err(ToolError::invalid_params(format!(
                    "{} must be at least {}",
                    name, min
                )));
            }
        }
        if let Some(max) = schema.maximum {
            if n > max {
                return Err(ToolError::invalid_params(format!(
                    "{} must be at most {}",
                    name, max
                )));
            }
        }
    }

    Ok(())
}

/// MCP-compatible tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (unique within a registry)
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Input schema
    fn schema(&self) -> ToolSchema;

    /// Execute the tool
    async fn execute(&self, input: ToolInput) -> Result<ToolOutput, ToolError>;

    /// Validate input against the schema
    ///
    /// Checks that the input is an object, that required properties are
    /// present and that every known property matches its declared type,
    /// enum and range. `null` values count as absent.
    fn validate(&self, input: &ToolInput) -> Result<(), ToolError> {
        let object = input
            .as_object()
            .ok_or_else(|| ToolError::invalid_params("Tool input must be a JSON object"))?;
        let schema = self.schema();

        for required in &schema.input_schema.required {
            match object.get(required) {
                Some(v) if !v.is_null() => {},
                _ => {
                    return Err(ToolError::invalid_params(format!(
                        "{} is required",
                        required
                    )))
                },
            }
        }

        for (name, value) in object {
            if value.is_null() {
                continue;
            }
            if let Some(prop) = schema.input_schema.properties.get(name) {
                validate_property(name, prop, value)?;
            }
        }

        Ok(())
    }

    /// Per-tool execution timeout
    fn timeout_secs(&self) -> u64 {
        DEFAULT_TOOL_TIMEOUT_SECS
    }
}
