//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod aggregate;
pub mod answer_query;
pub mod dispatch_tool;
pub mod extract_text;
pub mod lookup_indicator;
pub mod synthesize;
pub(crate) mod tool_helpers;
