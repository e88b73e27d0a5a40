//! Argument checks run before any executor sees a call.

use super::entities::{ToolCall, ToolDefinition};

/// Checks a model-supplied call against the declared parameters.
///
/// The `Err` text goes back to the model verbatim as an
/// `INVALID_ARGUMENT` tool error.
pub trait ToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Required parameters must be present and non-null; string values must be
/// inside the parameter's allowed set, if it has one. Extra arguments the
/// model invents are tolerated, since executors only read the keys they know.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            let value = call.arguments.get(&param.name).filter(|v| !v.is_null());

            let Some(value) = value else {
                if param.required {
                    return Err(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    ));
                }
                continue;
            };

            if let Some(text) = value.as_str()
                && !param.allows(text)
            {
                return Err(format!(
                    "Invalid value '{}' for parameter '{}' of tool '{}'. Allowed: {}",
                    text,
                    param.name,
                    definition.name,
                    param.allowed_values.join(", ")
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;

    fn period_tool() -> ToolDefinition {
        ToolDefinition::new("history", "history tool")
            .with_parameter(ToolParameter::new("ticker", "Ticker", true))
            .with_parameter(
                ToolParameter::new("period", "Period", false)
                    .with_allowed_values(["daily", "weekly", "monthly"]),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let result = DefaultToolValidator.validate(&ToolCall::new("history"), &period_tool());
        assert!(result.unwrap_err().contains("Missing required parameter 'ticker'"));
    }

    #[test]
    fn test_validator_null_counts_as_missing() {
        let call = ToolCall::new("history").with_arg("ticker", serde_json::Value::Null);
        assert!(DefaultToolValidator.validate(&call, &period_tool()).is_err());
    }

    #[test]
    fn test_validator_rejects_value_outside_allowed_set() {
        let call = ToolCall::new("history")
            .with_arg("ticker", "AAPL")
            .with_arg("period", "hourly");
        let err = DefaultToolValidator.validate(&call, &period_tool()).unwrap_err();
        assert!(err.contains("hourly"));
        assert!(err.contains("daily, weekly, monthly"));
    }

    #[test]
    fn test_validator_ignores_padding_around_allowed_value() {
        let call = ToolCall::new("history")
            .with_arg("ticker", "AAPL")
            .with_arg("period", " weekly ");
        assert!(DefaultToolValidator.validate(&call, &period_tool()).is_ok());
    }

    #[test]
    fn test_validator_tolerates_extra_arguments() {
        let call = ToolCall::new("history")
            .with_arg("ticker", "AAPL")
            .with_arg("period", "Weekly")
            .with_arg("note", "extra");
        assert!(DefaultToolValidator.validate(&call, &period_tool()).is_ok());
    }
}
