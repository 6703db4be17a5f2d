//! Tool Registry
//!
//! Manages tool registration, discovery, and execution.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use maduraai_config::{ConfigError, Settings};
use maduraai_core::{Tool, ToolError, ToolOutput, ToolSchema};

use crate::quick_tools::{
    EmiCalculatorTool, GstCalculatorTool, PasswordGeneratorTool, SearchToolsTool,
};

/// Tool executor trait
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool by name
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError>;

    /// List available tools
    fn list_tools(&self) -> Vec<ToolSchema>;

    /// Get tool schema by name
    fn get_tool(&self, name: &str) -> Option<ToolSchema>;
}

/// Tool registry
///
/// Ordered by name so listings are stable.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "Replaced previously registered tool");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names in sorted order
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    /// Validate the input, then execute under the tool's timeout
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::not_found(format!("Tool not found: {}", name)))?;

        let started = Instant::now();
        let result = run_tool(tool.as_ref(), name, arguments).await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let status = match &result {
            Ok(_) => "ok",
            Err(e) => {
                tracing::debug!(tool = name, code = e.code.code(), error = %e, "Tool call failed");
                "error"
            },
        };
        metrics::counter!(
            "maduraai_tool_calls_total",
            "tool" => name.to_string(),
            "status" => status
        )
        .increment(1);
        metrics::histogram!("maduraai_tool_latency_ms", "tool" => name.to_string())
            .record(elapsed_ms);

        result
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.tools.get(name).map(|t| t.schema())
    }
}

async fn run_tool(tool: &dyn Tool, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
    tool.validate(&arguments)?;

    let timeout_secs = tool.timeout_secs();
    tracing::trace!(tool = name, timeout_secs, "Executing tool with timeout");

    match tokio::time::timeout(Duration::from_secs(timeout_secs), tool.execute(arguments)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(ToolError::timeout(name, timeout_secs)
            .with_data(json!({ "timeout_secs": timeout_secs }))),
    }
}

/// Create a registry with every quick tool, configured from settings
pub fn create_registry(settings: &Settings) -> Result<ToolRegistry, ConfigError> {
    let tools = &settings.tools;
    let catalog = Arc::new(tools.tool_catalog()?);

    let mut registry = ToolRegistry::new();
    registry.register(EmiCalculatorTool::new(tools.emi).with_timeout(tools.timeout_secs));
    registry.register(GstCalculatorTool::new(tools.gst.clone()).with_timeout(tools.timeout_secs));
    registry.register(
        PasswordGeneratorTool::new(tools.password).with_timeout(tools.timeout_secs),
    );
    registry.register(SearchToolsTool::new(catalog).with_timeout(tools.timeout_secs));

    tracing::info!(
        tool_count = registry.len(),
        tools = ?registry.tool_names(),
        "Created tool registry"
    );

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maduraai_core::{ErrorCode, InputSchema, PropertySchema};

    struct SlowTool;

    #[async_trait]
    impl Tool for SlowTool {
        fn name(&self) -> &str {
            "slow"
        }

        fn description(&self) -> &str {
            "Never finishes in time"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "slow".to_string(),
                description: self.description().to_string(),
                input_schema: InputSchema::object().property(
                    "n",
                    PropertySchema::integer("Anything").with_range(0.0, 10.0),
                    false,
                ),
            }
        }

        async fn execute(&self, _input: Value) -> Result<ToolOutput, ToolError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(ToolOutput::text("late"))
        }

        fn timeout_secs(&self) -> u64 {
            1
        }
    }

    #[test]
    fn test_registry_basic() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(SlowTool);
        assert_eq!(registry.len(), 1);
        assert!(registry.has("slow"));
        assert!(registry.get_tool("slow").is_some());
    }

    #[test]
    fn test_create_registry() {
        let registry = create_registry(&Settings::default()).unwrap();
        assert_eq!(
            registry.tool_names(),
            vec![
                "calculate_emi",
                "calculate_gst",
                "generate_password",
                "search_tools"
            ]
        );
        assert_eq!(registry.list_tools().len(), 4);
    }

    #[test]
    fn test_create_registry_missing_catalog() {
        let mut settings = Settings::default();
        settings.tools.catalog_path = Some("/nonexistent/tools.yaml".to_string());
        assert!(matches!(
            create_registry(&settings),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nope", json!({})).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MethodNotFound);
    }

    #[tokio::test]
    async fn test_validation_runs_before_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(SlowTool);

        let err = registry.execute("slow", json!({"n": 99})).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let mut registry = ToolRegistry::new();
        registry.register(SlowTool);

        let err = registry.execute("slow", json!({})).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Timeout);
        assert!(err.message.contains("slow"));
        assert_eq!(err.data, Some(json!({"timeout_secs": 1})));
    }

    #[tokio::test]
    async fn test_execute_through_registry() {
        let registry = create_registry(&Settings::default()).unwrap();
        let output = registry
            .execute("calculate_gst", json!({"amount": 10000, "gst_rate": 18}))
            .await
            .unwrap();
        let data = output.as_json().unwrap();
        assert_eq!(data["total_amount"], json!(11800.0));
    }
}
