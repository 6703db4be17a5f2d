//! MCP tools for the quick tools service
//!
//! Implements MCP (Model Context Protocol) compatible tools over the core
//! calculators. Bounds, slabs and the catalogue come from settings.

pub mod quick_tools;
pub mod registry;

pub use quick_tools::{
    tool_summary, EmiCalculatorTool, GstCalculatorTool, PasswordGeneratorTool, SearchToolsTool,
};
pub use registry::{create_registry, ToolExecutor, ToolRegistry};

// Tool types live in core so other crates need not depend on this one
pub use maduraai_core::{
    ContentBlock, ErrorCode, InputSchema, PropertySchema, Tool, ToolError, ToolInput, ToolOutput,
    ToolSchema,
};
