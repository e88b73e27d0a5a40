//! Domain layer for finquery
//!
//! This crate contains the core types of the financial query pipeline.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! The model is offered a fixed menu of tools ([`ToolKind`]). It answers a
//! query either directly with text or by naming one tool plus arguments
//! ([`ToolCall`]). Running that tool yields exactly one [`ToolOutcome`].
//!
//! ## Response
//!
//! The synthesized text plus side artifacts (chart series, image, audio,
//! articles) form the [`ResponseEnvelope`]. [`QueryPhase`] tracks where a
//! query is in the pipeline.

pub mod core;
pub mod market;
pub mod prompt;
pub mod response;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    query::{MAX_QUERY_CHARS, Query},
};
pub use market::{
    Announcement, Article, ChartPoint, ChartSeries, IndicatorCode, IndicatorQuery, Period,
    PriceBar, ResolvedSymbol, SentimentLabel, SentimentReading, StockQuote, parse_date,
    proxy_ticker, resolve_symbol,
};
pub use prompt::PromptTemplate;
pub use response::{PhaseTracker, QueryPhase, ResponseEnvelope};
pub use session::response::{ContentBlock, LlmResponse, StopReason};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{OutcomePayload, ToolError, ToolOutcome, ToolOutcomeMetadata},
};
