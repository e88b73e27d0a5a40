//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod data_providers;
pub mod llm_gateway;
pub mod query_logger;
pub mod tool_executor;
pub mod tool_schema;
