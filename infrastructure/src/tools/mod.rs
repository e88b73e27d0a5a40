//! Tool executors for the financial query pipeline
//!
//! Each file implements one tool (or one family of tools) as a
//! [`ToolHandler`]; [`ToolRegistry`] maps tool kinds to handlers and is the
//! [`ToolExecutorPort`](finquery_application::ports::tool_executor::ToolExecutorPort)
//! handed to the dispatcher.
//!
//! ## Tools
//!
//! - `quote`: `get_stock_price` (live)
//! - `history`: `get_historical_stock_data` (live, chart)
//! - `news`: `get_financial_news` (live)
//! - `indicator`: `get_economic_indicator` (live, chart, cached)
//! - `regional`: `get_regional_announcements`, `get_market_sentiment`,
//!   `get_regional_indicator` (synthetic)
//! - `image`: `generate_image` (live)

pub mod history;
pub mod image;
pub mod indicator;
pub mod news;
pub mod quote;
pub mod regional;

mod registry;
mod schema;

#[cfg(test)]
pub(crate) mod test_support;

pub use history::HistoricalPriceTool;
pub use image::ImageGenerationTool;
pub use indicator::{EconomicIndicatorTool, IndicatorCache};
pub use news::FinancialNewsTool;
pub use quote::StockQuoteTool;
pub use regional::{
    MarketSentimentTool, RegionalAnnouncementsTool, RegionalIndicatorTool, SyntheticRegion,
};
pub use registry::{ToolHandler, ToolRegistry};
pub use schema::JsonSchemaToolConverter;

use finquery_domain::tool::entities::ToolSpec;
use finquery_domain::tool::value_objects::ToolError;

/// The full tool catalog, in declaration order
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(quote::stock_price_definition())
        .register(history::historical_stock_definition())
        .register(news::financial_news_definition())
        .register(indicator::economic_indicator_definition())
        .register(regional::regional_announcements_definition())
        .register(regional::market_sentiment_definition())
        .register(regional::regional_indicator_definition())
        .register(image::generate_image_definition())
}

/// Serialize a provider value into a payload fragment.
pub(crate) fn to_payload<T: serde::Serialize + ?Sized>(
    value: &T,
) -> Result<serde_json::Value, ToolError> {
    serde_json::to_value(value)
        .map_err(|e| ToolError::execution_failed(format!("Failed to encode payload: {}", e)))
}
