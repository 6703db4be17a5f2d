//! Quick tool implementations
//!
//! Each calculator from the quick tools page wrapped as an MCP-compatible
//! tool. Unavailable results come back as `null` fields, not errors.

mod emi;
mod gst;
mod password;
mod search;

pub use emi::EmiCalculatorTool;
pub use gst::GstCalculatorTool;
pub use password::PasswordGeneratorTool;
pub use search::{tool_summary, SearchToolsTool};
