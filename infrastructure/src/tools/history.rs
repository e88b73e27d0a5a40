//! `get_historical_stock_data`: OHLCV bars for charting.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `ticker` | string | Yes | Ticker symbol or index name |
//! | `period` | enum | No | `daily` (default), `weekly`, `monthly` |
//!
//! Index names are mapped to a tracking ETF before the provider call
//! (`S&P 500` → `SPY`). The series is sorted oldest first and trimmed to the
//! most recent `max_points` bars.

use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use finquery_application::ports::data_providers::MarketDataProvider;
use finquery_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter},
    payload,
    value_objects::{ToolError, ToolOutcome},
};
use finquery_domain::{ChartSeries, Period, PriceBar, resolve_symbol};
use std::sync::Arc;
use tracing::debug;

/// Create the [`ToolDefinition`] for `get_historical_stock_data`.
pub fn historical_stock_definition() -> ToolDefinition {
    ToolDefinition::for_kind(
        ToolKind::HistoricalStockData,
        "Get historical stock prices (open, high, low, close, volume) for a ticker or a \
         major index such as the S&P 500, NASDAQ or Dow Jones. Use this to show a price chart.",
    )
    .with_parameter(ToolParameter::new(
        "ticker",
        "Ticker symbol or index name, e.g. AAPL or S&P 500",
        true,
    ))
    .with_parameter(
        ToolParameter::new("period", "Bar period, defaults to daily", false)
            .with_allowed_values(Period::ALL.iter().map(|p| p.as_str())),
    )
}

/// Historical price series backed by a [`MarketDataProvider`]
pub struct HistoricalPriceTool {
    provider: Arc<dyn MarketDataProvider>,
    max_points: usize,
}

impl HistoricalPriceTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            max_points: 100,
        }
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points.max(1);
        self
    }
}

/// Sort oldest first and keep the last `max_points` bars.
fn most_recent(mut bars: Vec<PriceBar>, max_points: usize) -> Vec<PriceBar> {
    bars.sort_by_key(|b| b.date);
    let excess = bars.len().saturating_sub(max_points);
    bars.drain(..excess);
    bars
}

#[async_trait]
impl ToolHandler for HistoricalPriceTool {
    fn kind(&self) -> ToolKind {
        ToolKind::HistoricalStockData
    }

    fn definition(&self) -> ToolDefinition {
        historical_stock_definition()
    }

    async fn run(&self, call: &ToolCall) -> ToolOutcome {
        let name = ToolKind::HistoricalStockData.name();
        let ticker = match call.require_string("ticker") {
            Ok(t) => t,
            Err(e) => return ToolOutcome::failure(name, ToolError::invalid_argument(e)),
        };
        let period = match call.get_string("period").map(str::parse::<Period>) {
            None => Period::default(),
            Some(Ok(p)) => p,
            Some(Err(e)) => return ToolOutcome::failure(name, ToolError::invalid_argument(e)),
        };

        let symbol = resolve_symbol(ticker);
        debug!(
            requested = %symbol.requested,
            ticker = %symbol.ticker,
            period = %period,
            "Fetching price history"
        );

        let what = format!("{} price history for {}", period, symbol.ticker);
        let bars = match self.provider.history(&symbol.ticker, period).await {
            Ok(b) => b,
            Err(e) => return ToolOutcome::failure(name, e.into_tool_error(&what)),
        };
        if bars.is_empty() {
            return ToolOutcome::failure(
                name,
                ToolError::empty_result(format!("No data returned for {}", what)),
            );
        }

        let bars = most_recent(bars, self.max_points);
        let first_close = bars.first().map(|b| b.close);
        let last_close = bars.last().map(|b| b.close);
        let change_percent = match (first_close, last_close) {
            (Some(first), Some(last)) if first != 0.0 => Some((last - first) / first * 100.0),
            _ => None,
        };

        let mut body = serde_json::json!({
            "symbol": symbol.ticker,
            "period": period.as_str(),
            "points": bars.len(),
            "first_close": first_close,
            "last_close": last_close,
            "change_percent": change_percent,
        });
        if symbol.is_proxy() {
            body["proxy_for"] = serde_json::json!(symbol.requested);
        }
        match super::to_payload(&bars) {
            Ok(series) => body[payload::SERIES] = series,
            Err(e) => return ToolOutcome::failure(name, e),
        }

        ToolOutcome::success(name, body).with_chart_series(ChartSeries::Stock(bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::FakeMarket;
    use finquery_application::ports::data_providers::ProviderError;

    fn history_call(ticker: &str) -> ToolCall {
        ToolCall::for_kind(ToolKind::HistoricalStockData).with_arg("ticker", ticker)
    }

    #[tokio::test]
    async fn test_series_is_oldest_first_and_bounded() {
        let market = Arc::new(FakeMarket::with_bars(150));
        let tool = HistoricalPriceTool::new(market).with_max_points(100);

        let outcome = tool.run(&history_call("AAPL")).await;

        let series = outcome.chart_series().unwrap();
        assert!(series.is_stock());
        assert_eq!(series.len(), 100);
        let points = series.points();
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(outcome.success_payload().unwrap()["points"], 100);
        assert_eq!(
            outcome.success_payload().unwrap()[payload::SERIES]
                .as_array()
                .unwrap()
                .len(),
            100
        );
    }

    #[tokio::test]
    async fn test_repeated_calls_return_identical_series() {
        let market = Arc::new(FakeMarket::with_bars(30));
        let tool = HistoricalPriceTool::new(market);

        let first = tool.run(&history_call("MSFT")).await;
        let second = tool.run(&history_call("MSFT")).await;

        assert_eq!(first.chart_series(), second.chart_series());
        assert_eq!(first.success_payload(), second.success_payload());
    }

    #[tokio::test]
    async fn test_index_alias_sends_proxy_ticker() {
        let market = Arc::new(FakeMarket::with_bars(10));
        let tool = HistoricalPriceTool::new(market.clone());

        let outcome = tool.run(&history_call("  s&p 500 ")).await;

        assert_eq!(market.requested(), vec!["SPY".to_string()]);
        let payload = outcome.success_payload().unwrap();
        assert_eq!(payload["symbol"], "SPY");
        assert_eq!(payload["proxy_for"], "s&p 500");
    }

    #[tokio::test]
    async fn test_period_is_forwarded() {
        let market = Arc::new(FakeMarket::with_bars(10));
        let tool = HistoricalPriceTool::new(market.clone());

        let call = history_call("AAPL").with_arg("period", "Weekly");
        tool.run(&call).await;

        assert_eq!(market.periods(), vec![Period::Weekly]);
    }

    #[tokio::test]
    async fn test_empty_history_is_empty_result_without_series() {
        let market = Arc::new(FakeMarket::with_bars(0));
        let tool = HistoricalPriceTool::new(market);

        let outcome = tool.run(&history_call("AAPL")).await;

        assert_eq!(outcome.error().unwrap().code, "EMPTY_RESULT");
        assert!(outcome.chart_series().is_none());
    }

    #[tokio::test]
    async fn test_provider_failure_has_no_series() {
        let market = Arc::new(FakeMarket::failing(ProviderError::transport(
            "Alpha Vantage",
            "connection reset",
        )));
        let tool = HistoricalPriceTool::new(market);

        let outcome = tool.run(&history_call("AAPL")).await;

        let error = outcome.error().unwrap();
        assert_eq!(error.code, "UPSTREAM_ERROR");
        assert_eq!(error.message, "Failed to fetch daily price history for AAPL");
        assert!(outcome.chart_series().is_none());
    }
}
