//! Direct macro-indicator lookup.
//!
//! Runs the economic indicator tool without involving the model. The call
//! goes through the same executor as a model-chosen lookup, so it shares the
//! indicator cache and the success/error outcome contract.

use crate::config::PipelineParams;
use crate::ports::tool_executor::ToolExecutorPort;
use finquery_domain::tool::entities::{ToolCall, ToolKind};
use finquery_domain::tool::value_objects::ToolError;
use finquery_domain::{IndicatorCode, IndicatorQuery, parse_date};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors returned by [`LookupIndicatorUseCase`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupIndicatorError {
    /// Bad code, date or range in the request
    #[error("{0}")]
    InvalidInput(String),

    /// The provider could not answer
    #[error("{0}")]
    Provider(ToolError),
}

/// Input for the [`LookupIndicatorUseCase`].
#[derive(Debug, Clone, Default)]
pub struct LookupIndicatorInput {
    pub indicator_code: String,
    pub country_code: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl LookupIndicatorInput {
    pub fn new(indicator_code: impl Into<String>) -> Self {
        Self {
            indicator_code: indicator_code.into(),
            ..Default::default()
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country_code = Some(country.into());
        self
    }

    pub fn with_range(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Validate into a typed query, filling in the default country.
    pub fn to_query(&self, default_country: &str) -> Result<IndicatorQuery, LookupIndicatorError> {
        let code: IndicatorCode = self
            .indicator_code
            .parse()
            .map_err(LookupIndicatorError::InvalidInput)?;

        let country = self
            .country_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_country);

        let start = parse_optional_date(self.start_date.as_deref())?;
        let end = parse_optional_date(self.end_date.as_deref())?;

        let query = IndicatorQuery::new(code, country).with_range(start, end);
        query
            .validate_range()
            .map_err(LookupIndicatorError::InvalidInput)?;
        Ok(query)
    }
}

fn parse_optional_date(
    value: Option<&str>,
) -> Result<Option<chrono::NaiveDate>, LookupIndicatorError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_date(v)
            .map(Some)
            .map_err(LookupIndicatorError::InvalidInput),
        None => Ok(None),
    }
}

/// Use case for the model-free indicator endpoint.
#[derive(Clone)]
pub struct LookupIndicatorUseCase {
    executor: Arc<dyn ToolExecutorPort>,
    params: PipelineParams,
}

impl LookupIndicatorUseCase {
    pub fn new(executor: Arc<dyn ToolExecutorPort>) -> Self {
        Self {
            executor,
            params: PipelineParams::default(),
        }
    }

    pub fn with_params(mut self, params: PipelineParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the indicator tool's success payload.
    pub async fn execute(
        &self,
        input: LookupIndicatorInput,
    ) -> Result<serde_json::Value, LookupIndicatorError> {
        let query = input.to_query(&self.params.default_country)?;
        info!(
            "Direct indicator lookup: {} for {}",
            query.code, query.country
        );

        let mut call = ToolCall::for_kind(ToolKind::EconomicIndicator)
            .with_arg("indicator_code", query.code.code())
            .with_arg("country_code", query.country.clone());
        if let Some(start) = query.start {
            call = call.with_arg("start_date", start.to_string());
        }
        if let Some(end) = query.end {
            call = call.with_arg("end_date", end.to_string());
        }

        match self.executor.execute(&call).await.into_result() {
            Ok(payload) => Ok(payload),
            Err(e) if e.code == "INVALID_ARGUMENT" => {
                Err(LookupIndicatorError::InvalidInput(e.message))
            }
            Err(e) => Err(LookupIndicatorError::Provider(e)),
        }
    }
}
