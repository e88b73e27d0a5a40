//! Tool domain module
//!
//! This module defines the **Tool System**: the fixed menu of data-fetching
//! capabilities the model may request while answering a financial query.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolOutcome  │
//! │ (catalog)    │    │ (model pick) │    │ success XOR  │
//! └──────┬───────┘    └──────────────┘    │ error        │
//!        │                                └──────────────┘
//!        └─ ToolDefinition per ToolKind
//! ```
//!
//! The set of tools is closed: [`ToolKind`] enumerates every tool known at
//! compile time and [`ToolKind::from_name`] is the only way a model-supplied
//! name becomes a tool. A name with no variant is an unrecognized function.
//!
//! # Key Types
//!
//! - [`ToolKind`]: closed set of tools and their wire names
//! - [`ToolSpec`]: ordered catalog of [`ToolDefinition`]s declared to the model
//! - [`ToolDefinition`]: name, description, typed parameters
//! - [`ToolCall`]: the model's invocation request
//! - [`ToolOutcome`]: normalized success-or-error result, with optional chart series
//! - [`ToolValidator`]: pure parameter validation
//!
//! # Architecture
//!
//! - **Domain** (this module): Pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`, `ToolDispatcher`): dispatch contract
//! - **Infrastructure** (`ToolRegistry` + executors): provider calls

pub mod entities;
pub mod payload;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{OutcomePayload, ToolError, ToolOutcome, ToolOutcomeMetadata};
