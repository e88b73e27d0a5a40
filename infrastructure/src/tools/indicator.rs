//! `get_economic_indicator`: macro-indicator series with a response cache.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `indicator_code` | string | Yes | `CPI`, `PPI`, `INTEREST_RATE`, `GDP` (aliases accepted) |
//! | `country_code` | string | No | ISO country code, defaults to the configured country |
//! | `start_date` | date | No | `YYYY-MM-DD` |
//! | `end_date` | date | No | `YYYY-MM-DD` |
//!
//! An unsupported code is rejected before any provider call. Successful
//! lookups are cached per `(code, country, start, end)`; failures are not.

use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use finquery_application::ports::data_providers::IndicatorProvider;
use finquery_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter},
    payload,
    value_objects::{ToolError, ToolOutcome},
};
use finquery_domain::{ChartPoint, ChartSeries, IndicatorCode, IndicatorQuery, parse_date};
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Create the [`ToolDefinition`] for `get_economic_indicator`.
pub fn economic_indicator_definition() -> ToolDefinition {
    ToolDefinition::for_kind(
        ToolKind::EconomicIndicator,
        "Get a macroeconomic indicator time series for a country: consumer prices (CPI), \
         producer prices (PPI), the policy interest rate (INTEREST_RATE) or GDP growth (GDP).",
    )
    .with_parameter(ToolParameter::new(
        "indicator_code",
        "One of CPI, PPI, INTEREST_RATE, GDP",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "country_code",
        "ISO country code, e.g. CN or US",
        false,
    ))
    .with_parameter(
        ToolParameter::new("start_date", "First date, YYYY-MM-DD", false).with_type("date"),
    )
    .with_parameter(
        ToolParameter::new("end_date", "Last date, YYYY-MM-DD", false).with_type("date"),
    )
}

/// Read-through cache of successful indicator lookups.
#[derive(Clone)]
pub struct IndicatorCache {
    cache: Cache<IndicatorQuery, Vec<ChartPoint>>,
}

impl IndicatorCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity.max(1))
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub fn get(&self, query: &IndicatorQuery) -> Option<Vec<ChartPoint>> {
        self.cache.get(query)
    }

    pub fn insert(&self, query: IndicatorQuery, points: Vec<ChartPoint>) {
        self.cache.insert(query, points);
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

/// Parse the shared `indicator_code` argument, accepting aliases.
pub(crate) fn indicator_code_arg(call: &ToolCall) -> Result<IndicatorCode, ToolError> {
    call.require_string("indicator_code")
        .and_then(str::parse::<IndicatorCode>)
        .map_err(ToolError::invalid_argument)
}

fn date_arg(call: &ToolCall, key: &str) -> Result<Option<chrono::NaiveDate>, ToolError> {
    call.get_string(key)
        .map(parse_date)
        .transpose()
        .map_err(ToolError::invalid_argument)
}

/// Build the success payload for an indicator series.
pub(crate) fn series_payload(
    code: IndicatorCode,
    region: &str,
    points: &[ChartPoint],
) -> Result<serde_json::Value, ToolError> {
    let latest = points.last();
    Ok(serde_json::json!({
        "indicator_code": code.code(),
        "indicator": code.label(),
        "country": region,
        "points": points.len(),
        "latest_date": latest.map(|p| p.date.to_string()),
        "latest_value": latest.map(|p| p.value),
        payload::SERIES: super::to_payload(points)?,
    }))
}

/// Macro-indicator lookup backed by an [`IndicatorProvider`]
pub struct EconomicIndicatorTool {
    provider: Arc<dyn IndicatorProvider>,
    cache: Option<IndicatorCache>,
    default_country: String,
}

impl EconomicIndicatorTool {
    pub fn new(provider: Arc<dyn IndicatorProvider>) -> Self {
        Self {
            provider,
            cache: None,
            default_country: "CN".to_string(),
        }
    }

    pub fn with_cache(mut self, cache: IndicatorCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_default_country(mut self, country: impl AsRef<str>) -> Self {
        self.default_country = country.as_ref().trim().to_uppercase();
        self
    }

    fn query_from(&self, call: &ToolCall) -> Result<IndicatorQuery, ToolError> {
        let code = indicator_code_arg(call)?;
        let country = call
            .get_string("country_code")
            .unwrap_or(&self.default_country);
        let query = IndicatorQuery::new(code, country)
            .with_range(date_arg(call, "start_date")?, date_arg(call, "end_date")?);
        query.validate_range().map_err(ToolError::invalid_argument)?;
        Ok(query)
    }

    fn outcome(query: &IndicatorQuery, points: Vec<ChartPoint>) -> ToolOutcome {
        let name = ToolKind::EconomicIndicator.name();
        let series = ChartSeries::economic(points);
        let points = series.points();
        match series_payload(query.code, &query.country, &points) {
            Ok(mut body) => {
                body["start_date"] = serde_json::json!(query.start.map(|d| d.to_string()));
                body["end_date"] = serde_json::json!(query.end.map(|d| d.to_string()));
                ToolOutcome::success(name, body).with_chart_series(series)
            }
            Err(e) => ToolOutcome::failure(name, e),
        }
    }
}

#[async_trait]
impl ToolHandler for EconomicIndicatorTool {
    fn kind(&self) -> ToolKind {
        ToolKind::EconomicIndicator
    }

    fn definition(&self) -> ToolDefinition {
        economic_indicator_definition()
    }

    async fn run(&self, call: &ToolCall) -> ToolOutcome {
        let name = ToolKind::EconomicIndicator.name();
        let query = match self.query_from(call) {
            Ok(q) => q,
            Err(e) => return ToolOutcome::failure(name, e),
        };

        if let Some(points) = self.cache.as_ref().and_then(|c| c.get(&query)) {
            debug!(code = %query.code, country = %query.country, "Indicator cache hit");
            return Self::outcome(&query, points).mark_cached();
        }

        debug!(code = %query.code, country = %query.country, "Fetching indicator series");
        let what = format!("{} for {}", query.code.label(), query.country);
        let points = match self.provider.series(&query).await {
            Ok(p) => p,
            Err(e) => return ToolOutcome::failure(name, e.into_tool_error(&what)),
        };
        if points.is_empty() {
            return ToolOutcome::failure(
                name,
                ToolError::empty_result(format!("No data returned for {}", what)),
            );
        }

        if let Some(cache) = &self.cache {
            cache.insert(query.clone(), points.clone());
        }
        Self::outcome(&query, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::FakeIndicators;
    use finquery_application::ports::data_providers::ProviderError;

    fn indicator_call(code: &str) -> ToolCall {
        ToolCall::for_kind(ToolKind::EconomicIndicator).with_arg("indicator_code", code)
    }

    fn cache() -> IndicatorCache {
        IndicatorCache::new(100, Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn test_unsupported_code_never_calls_provider() {
        let provider = Arc::new(FakeIndicators::default());
        let tool = EconomicIndicatorTool::new(provider.clone());

        let outcome = tool.run(&indicator_call("UNEMPLOYMENT")).await;

        let error = outcome.error().unwrap();
        assert_eq!(error.code, "INVALID_ARGUMENT");
        assert!(error.message.contains("CPI, PPI, INTEREST_RATE, GDP"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_alias_and_default_country() {
        let provider = Arc::new(FakeIndicators::default());
        let tool = EconomicIndicatorTool::new(provider).with_default_country("us");

        let outcome = tool.run(&indicator_call("interest rate")).await;

        let body = outcome.success_payload().unwrap();
        assert_eq!(body["indicator_code"], "INTEREST_RATE");
        assert_eq!(body["country"], "US");
        assert_eq!(body["latest_date"], "2024-03-31");
    }

    #[tokio::test]
    async fn test_series_sorted_oldest_first() {
        let tool = EconomicIndicatorTool::new(Arc::new(FakeIndicators::default()));

        let outcome = tool.run(&indicator_call("CPI")).await;

        let series = outcome.chart_series().unwrap();
        assert!(!series.is_stock());
        let dates: Vec<String> = series.points().iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-31", "2024-02-29", "2024-03-31"]);
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let provider = Arc::new(FakeIndicators::default());
        let tool = EconomicIndicatorTool::new(provider.clone()).with_cache(cache());

        let first = tool.run(&indicator_call("CPI")).await;
        let second = tool.run(&indicator_call("cpi")).await;

        assert_eq!(provider.call_count(), 1);
        assert!(!first.metadata.cached);
        assert!(second.metadata.cached);
        assert_eq!(first.success_payload(), second.success_payload());
    }

    #[tokio::test]
    async fn test_different_country_misses_cache() {
        let provider = Arc::new(FakeIndicators::default());
        let tool = EconomicIndicatorTool::new(provider.clone()).with_cache(cache());

        tool.run(&indicator_call("GDP")).await;
        tool.run(&indicator_call("GDP").with_arg("country_code", "DE"))
            .await;

        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let provider = Arc::new(FakeIndicators::failing(ProviderError::Status {
            provider: "Trading Economics".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        }));
        let cache = cache();
        let tool = EconomicIndicatorTool::new(provider.clone()).with_cache(cache.clone());

        let outcome = tool.run(&indicator_call("PPI")).await;
        tool.run(&indicator_call("PPI")).await;

        assert_eq!(outcome.error().unwrap().code, "UPSTREAM_ERROR");
        assert!(outcome.chart_series().is_none());
        assert_eq!(provider.call_count(), 2);
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_inverted_range_is_invalid() {
        let provider = Arc::new(FakeIndicators::default());
        let tool = EconomicIndicatorTool::new(provider.clone());

        let call = indicator_call("CPI")
            .with_arg("start_date", "2024-06-01")
            .with_arg("end_date", "2024-01-01");
        let outcome = tool.run(&call).await;

        assert_eq!(outcome.error().unwrap().code, "INVALID_ARGUMENT");
        assert_eq!(provider.call_count(), 0);
    }
}
