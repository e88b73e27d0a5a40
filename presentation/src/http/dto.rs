//! Request and response bodies (camelCase on the wire)

use finquery_application::LookupIndicatorInput;
use finquery_domain::{Article, ChartPoint, ChartSeries, PriceBar, ResponseEnvelope};
use serde::{Deserialize, Serialize};

/// `POST /api/query`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

/// Answer to a query. Only artifacts actually produced are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_stock_data: Option<Vec<PriceBar>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_economic_data: Option<Vec<ChartPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<Article>>,
}

impl From<ResponseEnvelope> for QueryResponse {
    fn from(envelope: ResponseEnvelope) -> Self {
        let (historical_stock_data, historical_economic_data) = match envelope.chart_series {
            Some(ChartSeries::Stock(bars)) => (Some(bars), None),
            Some(ChartSeries::Economic(points)) => (None, Some(points)),
            None => (None, None),
        };
        Self {
            summary: envelope.summary,
            image_url: envelope.image_url,
            audio_url: envelope.audio_url,
            historical_stock_data,
            historical_economic_data,
            articles: envelope.articles,
        }
    }
}

/// `POST /api/economic-indicator`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorRequest {
    #[serde(default)]
    pub indicator_code: String,
    pub country_code: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<IndicatorRequest> for LookupIndicatorInput {
    fn from(req: IndicatorRequest) -> Self {
        LookupIndicatorInput {
            indicator_code: req.indicator_code,
            country_code: req.country_code,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// `POST /api/ocr`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrResponse {
    pub text: String,
}
