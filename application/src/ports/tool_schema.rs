//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how to declare them to the
//! model API" (infrastructure).

use finquery_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to function declarations (JSON Schema).
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to a provider-neutral declaration.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools, in catalog declaration order.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;
}
