//! Function declarations for the model.
//!
//! [`JsonSchemaToolConverter`] renders the catalog in the
//! `{name, description, parameters}` shape of Gemini `functionDeclarations`.
//! The same output backs `GET /api/tools` and `finquery tools`.

use finquery_application::ports::tool_schema::ToolSchemaPort;
use finquery_domain::tool::entities::{ToolDefinition, ToolParameter, ToolSpec};
use serde_json::{Map, Value, json};

/// Catalog → JSON Schema (OpenAPI subset) converter.
///
/// Dates travel as strings; parameters with allowed values become `enum`s.
pub struct JsonSchemaToolConverter;

fn json_type(param_type: &str) -> &'static str {
    match param_type {
        "number" => "number",
        "integer" => "integer",
        "boolean" => "boolean",
        // "string", "date" and anything unknown
        _ => "string",
    }
}

fn param_schema(param: &ToolParameter) -> Value {
    let mut schema = json!({
        "type": json_type(&param.param_type),
        "description": param.description,
    });
    if !param.allowed_values.is_empty() {
        schema["enum"] = json!(param.allowed_values);
    }
    schema
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let properties: Map<String, Value> = tool
            .parameters
            .iter()
            .map(|p| (p.name.clone(), param_schema(p)))
            .collect();
        let required: Vec<&str> = tool
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        spec.all().map(|t| self.tool_to_schema(t)).collect()
    }
}
