//! Application layer for finquery
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PipelineParams;
pub use ports::{
    data_providers::{
        ImageProvider, ImageUpload, IndicatorProvider, MarketDataProvider, NewsProvider,
        OcrProvider, ProviderError, SpeechProvider,
    },
    llm_gateway::{GatewayError, LlmGateway, LlmSession, ToolResultMessage},
    query_logger::{NoQueryLogger, QueryEvent, QueryLogger},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::aggregate::ResponseAggregator;
pub use use_cases::answer_query::{
    AnswerQueryError, AnswerQueryInput, AnswerQueryOutput, AnswerQueryUseCase,
};
pub use use_cases::dispatch_tool::{DispatchError, ToolDispatcher};
pub use use_cases::extract_text::ExtractTextUseCase;
pub use use_cases::lookup_indicator::{
    LookupIndicatorError, LookupIndicatorInput, LookupIndicatorUseCase,
};
pub use use_cases::synthesize::ResponseSynthesizer;
