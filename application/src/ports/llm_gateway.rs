//! LLM Gateway port
//!
//! Defines the interface for communicating with the function-calling model.

use async_trait::async_trait;
use finquery_domain::LlmResponse;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Result of running one tool, handed back to the model as a function response.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResultMessage {
    /// Name of the function the model called
    pub tool_name: String,
    /// Function response body
    pub output: serde_json::Value,
    /// Whether `output` describes a failure
    pub is_error: bool,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with the model.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Model identifier used for new sessions
    fn model_name(&self) -> &str;

    /// Create a fresh conversation with a system instruction.
    ///
    /// Sessions hold one query's turns only; nothing carries over between
    /// queries.
    async fn create_session(
        &self,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Send a message together with the declared function menu.
    ///
    /// `tools` are JSON Schema declarations produced by
    /// [`ToolSchemaPort`](super::tool_schema::ToolSchemaPort).
    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError>;

    /// Continue the conversation with function results.
    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError>;
}
