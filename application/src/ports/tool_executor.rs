//! Tool executor port
//!
//! The dispatcher's view of the tools: what the model may call, and how to
//! run one call.

use async_trait::async_trait;
use finquery_domain::tool::{
    entities::{ToolCall, ToolKind, ToolSpec},
    value_objects::ToolOutcome,
};

/// Runs model-requested tools.
///
/// `execute` never fails: transport errors, missing credentials and empty
/// upstream payloads all come back as the error half of [`ToolOutcome`].
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// The catalog declared to the model, in declaration order.
    fn tool_spec(&self) -> &ToolSpec;

    /// Whether a call of this kind would reach an executor.
    fn supports(&self, kind: ToolKind) -> bool {
        self.tool_spec().contains(kind.name())
    }

    /// Run the call exactly once.
    async fn execute(&self, call: &ToolCall) -> ToolOutcome;
}
