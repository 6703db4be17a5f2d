//! Tool search over the quick tools catalogue

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use maduraai_core::{
    InputSchema, PropertySchema, QuickTool, Tool, ToolCatalog, ToolError, ToolOutput, ToolSchema,
    MAX_SEARCH_RESULTS,
};

/// Search tool
pub struct SearchToolsTool {
    catalog: Arc<ToolCatalog>,
    timeout_secs: u64,
}

impl SearchToolsTool {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self {
            catalog,
            timeout_secs: maduraai_core::traits::DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for SearchToolsTool {
    fn default() -> Self {
        Self::new(Arc::new(ToolCatalog::builtin()))
    }
}

/// JSON view of a catalogue entry
pub fn tool_summary(tool: &QuickTool) -> Value {
    json!({
        "id": tool.id,
        "name": tool.name,
        "description": tool.description,
        "weblink": tool.weblink,
        "external": tool.is_external(),
    })
}

#[async_trait]
impl Tool for SearchToolsTool {
    fn name(&self) -> &str {
        "search_tools"
    }

    fn description(&self) -> &str {
        "Find quick tools by name, description or keyword"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object().property(
                "query",
                PropertySchema::string(format!(
                    "Search text; at most {} matches are returned",
                    MAX_SEARCH_RESULTS
                )),
                true,
            ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let query = input
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::invalid_params("query is required"))?;

        let results: Vec<Value> = self
            .catalog
            .search(query)
            .into_iter()
            .map(tool_summary)
            .collect();

        tracing::debug!(query, hits = results.len(), "Searched tool catalogue");

        Ok(ToolOutput::json(json!({
            "query": query,
            "results": results,
        })))
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}
