//! Infrastructure layer for finquery
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the Gemini model gateway, the upstream data provider
//! clients, the tool executors, the JSONL query log and configuration file
//! loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use gemini::{error::GeminiError, gateway::GeminiLlmGateway, session::GeminiSession};
pub use logging::JsonlQueryLogger;
pub use providers::{
    AlphaVantageClient, NewsApiClient, OcrSpaceClient, OpenAiClient, TradingEconomicsClient,
    build_http_client,
};
pub use tools::{IndicatorCache, JsonSchemaToolConverter, ToolRegistry, default_tool_spec};
