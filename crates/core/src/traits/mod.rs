//! Core traits for the quick tools
//!
//! ```text
//! Calculators:
//!   - Calculator: configured, pure computation with an optional result
//!
//! Tools:
//!   - Tool: MCP-compatible tool interface over JSON input
//! ```

mod calculator;
mod tool;

pub use calculator::Calculator;
pub use tool::{
    validate_property, ContentBlock, ErrorCode, InputSchema, PropertySchema, Tool, ToolError,
    ToolInput, ToolOutput, ToolSchema, DEFAULT_TOOL_TIMEOUT_SECS,
};
