//! Tool domain value objects: immutable outcome and error types
//!
//! Every tool execution produces exactly one [`ToolOutcome`]. The payload is
//! an enum, so an outcome is a success or an error and never both. Only a
//! successful outcome can carry a [`ChartSeries`].

use crate::market::ChartSeries;
use serde::{Deserialize, Serialize};

/// Error produced by a tool executor.
///
/// | Code | Meaning |
/// |------|---------|
/// | `INVALID_ARGUMENT` | Missing/invalid parameters from the model |
/// | `MISSING_CREDENTIAL` | Provider API key is not configured |
/// | `UPSTREAM_ERROR` | Transport failure or non-success status from the provider |
/// | `EMPTY_RESULT` | Provider answered but returned no usable data |
/// | `NOT_FOUND` | Provider reported an unknown symbol, indicator or resource |
/// | `EXECUTION_FAILED` | Anything else that went wrong inside the executor |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "UPSTREAM_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Internal detail (provider message, status line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn missing_credential(provider: impl Into<String>) -> Self {
        Self::new(
            "MISSING_CREDENTIAL",
            format!("No API key configured for {}", provider.into()),
        )
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new("UPSTREAM_ERROR", message)
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::new("EMPTY_RESULT", message)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("Not found: {}", resource.into()))
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Success or error half of a [`ToolOutcome`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomePayload {
    /// Tool-specific JSON payload
    Success(serde_json::Value),
    /// Normalized failure
    Error(ToolError),
}

/// Structured metadata about one tool execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcomeMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Whether the payload came from the indicator cache
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
}

/// Normalized result of running one tool once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    /// Name of the tool that was executed
    pub tool_name: String,
    #[serde(flatten)]
    payload: OutcomePayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart_series: Option<ChartSeries>,
    #[serde(default)]
    pub metadata: ToolOutcomeMetadata,
}

impl ToolOutcome {
    /// Create a successful outcome
    pub fn success(tool_name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            payload: OutcomePayload::Success(payload),
            chart_series: None,
            metadata: ToolOutcomeMetadata::default(),
        }
    }

    /// Create a failed outcome
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            payload: OutcomePayload::Error(error),
            chart_series: None,
            metadata: ToolOutcomeMetadata::default(),
        }
    }

    /// Attach a chart series. Ignored on a failed outcome.
    pub fn with_chart_series(mut self, series: ChartSeries) -> Self {
        if self.is_success() {
            self.chart_series = Some(series);
        }
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn mark_cached(mut self) -> Self {
        self.metadata.cached = true;
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.payload, OutcomePayload::Success(_))
    }

    pub fn payload(&self) -> &OutcomePayload {
        &self.payload
    }

    /// The success payload, if this outcome succeeded
    pub fn success_payload(&self) -> Option<&serde_json::Value> {
        match &self.payload {
            OutcomePayload::Success(value) => Some(value),
            OutcomePayload::Error(_) => None,
        }
    }

    /// The error, if this outcome failed
    pub fn error(&self) -> Option<&ToolError> {
        match &self.payload {
            OutcomePayload::Success(_) => None,
            OutcomePayload::Error(error) => Some(error),
        }
    }

    pub fn chart_series(&self) -> Option<&ChartSeries> {
        self.chart_series.as_ref()
    }

    /// The body handed back to the model as the function result.
    ///
    /// Errors are reduced to the user-facing message plus detail so the model
    /// can explain the failure without seeing internal codes.
    pub fn function_response(&self) -> serde_json::Value {
        match &self.payload {
            OutcomePayload::Success(value) => strip_inline_data(value.clone()),
            OutcomePayload::Error(error) => serde_json::json!({
                "error": error.message,
                "details": error.details,
            }),
        }
    }

    /// Consume into `Ok(payload)` or `Err(error)`.
    pub fn into_result(self) -> Result<serde_json::Value, ToolError> {
        match self.payload {
            OutcomePayload::Success(value) => Ok(value),
            OutcomePayload::Error(error) => Err(error),
        }
    }
}

/// Replace `data:` URLs with a short marker; the model only needs to know
/// the artifact exists.
fn strip_inline_data(mut value: serde_json::Value) -> serde_json::Value {
    if let Some(map) = value.as_object_mut() {
        for entry in map.values_mut() {
            if entry.as_str().is_some_and(|s| s.starts_with("data:")) {
                *entry = serde_json::Value::String("[attached to the response]".to_string());
            }
        }
    }
    value
}
