//! `get_stock_price`: latest quote for one ticker.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `ticker` | string | Yes | Ticker symbol or index name |
//!
//! Index names go through the proxy alias table, same as the history tool.

use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use finquery_application::ports::data_providers::MarketDataProvider;
use finquery_domain::resolve_symbol;
use finquery_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter},
    value_objects::{ToolError, ToolOutcome},
};
use std::sync::Arc;
use tracing::debug;

/// Create the [`ToolDefinition`] for `get_stock_price`.
pub fn stock_price_definition() -> ToolDefinition {
    ToolDefinition::for_kind(
        ToolKind::StockQuote,
        "Get the latest stock price quote for a ticker symbol: price, open, high, low, \
         volume, previous close and change.",
    )
    .with_parameter(ToolParameter::new(
        "ticker",
        "Ticker symbol, e.g. AAPL or MSFT",
        true,
    ))
}

/// Quote lookup backed by a [`MarketDataProvider`]
pub struct StockQuoteTool {
    provider: Arc<dyn MarketDataProvider>,
}

impl StockQuoteTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ToolHandler for StockQuoteTool {
    fn kind(&self) -> ToolKind {
        ToolKind::StockQuote
    }

    fn definition(&self) -> ToolDefinition {
        stock_price_definition()
    }

    async fn run(&self, call: &ToolCall) -> ToolOutcome {
        let name = ToolKind::StockQuote.name();
        let ticker = match call.require_string("ticker") {
            Ok(t) => t,
            Err(e) => return ToolOutcome::failure(name, ToolError::invalid_argument(e)),
        };

        let symbol = resolve_symbol(ticker);
        debug!(requested = %symbol.requested, ticker = %symbol.ticker, "Fetching quote");

        let quote = match self.provider.quote(&symbol.ticker).await {
            Ok(q) => q,
            Err(e) => {
                return ToolOutcome::failure(
                    name,
                    e.into_tool_error(&format!("quote for {}", symbol.ticker)),
                );
            }
        };

        let mut payload = match super::to_payload(&quote) {
            Ok(p) => p,
            Err(e) => return ToolOutcome::failure(name, e),
        };
        if symbol.is_proxy() {
            payload["proxy_for"] = serde_json::json!(symbol.requested);
        }

        ToolOutcome::success(name, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::FakeMarket;
    use finquery_application::ports::data_providers::ProviderError;

    #[tokio::test]
    async fn test_quote_success() {
        let market = Arc::new(FakeMarket::default());
        let tool = StockQuoteTool::new(market.clone());

        let call = ToolCall::for_kind(ToolKind::StockQuote).with_arg("ticker", "aapl");
        let outcome = tool.run(&call).await;

        let payload = outcome.success_payload().unwrap();
        assert_eq!(payload["symbol"], "AAPL");
        assert_eq!(payload["price"], 170.5);
        assert!(payload.get("proxy_for").is_none());
        assert!(outcome.chart_series().is_none());
        assert_eq!(market.requested(), vec!["AAPL".to_string()]);
    }

    #[tokio::test]
    async fn test_quote_for_index_uses_proxy() {
        let market = Arc::new(FakeMarket::default());
        let tool = StockQuoteTool::new(market.clone());

        let call = ToolCall::for_kind(ToolKind::StockQuote).with_arg("ticker", "Dow Jones");
        let outcome = tool.run(&call).await;

        assert_eq!(outcome.success_payload().unwrap()["proxy_for"], "Dow Jones");
        assert_eq!(market.requested(), vec!["DIA".to_string()]);
    }

    #[tokio::test]
    async fn test_quote_provider_error_becomes_error_half() {
        let market = Arc::new(FakeMarket::failing(ProviderError::NotFound(
            "symbol ZZZZ".to_string(),
        )));
        let tool = StockQuoteTool::new(market);

        let call = ToolCall::for_kind(ToolKind::StockQuote).with_arg("ticker", "ZZZZ");
        let outcome = tool.run(&call).await;

        assert!(outcome.success_payload().is_none());
        assert_eq!(outcome.error().unwrap().code, "NOT_FOUND");
    }
}
