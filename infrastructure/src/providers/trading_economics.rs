//! Trading Economics historical indicator client
//!
//! The API addresses countries and indicators by display name, so ISO codes
//! and [`IndicatorCode`]s are mapped before the request is built.

use super::{require_key, send_json};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use chrono::NaiveDate;
use finquery_application::ports::data_providers::{IndicatorProvider, ProviderError};
use finquery_domain::{ChartPoint, IndicatorCode, IndicatorQuery};
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

const PROVIDER: &str = "Trading Economics";

const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("CN", "china"),
    ("US", "united states"),
    ("GB", "united kingdom"),
    ("UK", "united kingdom"),
    ("JP", "japan"),
    ("DE", "germany"),
    ("FR", "france"),
    ("IT", "italy"),
    ("CA", "canada"),
    ("AU", "australia"),
    ("IN", "india"),
    ("BR", "brazil"),
    ("KR", "south korea"),
    ("HK", "hong kong"),
    ("SG", "singapore"),
    ("EA", "euro area"),
    ("EU", "euro area"),
];

/// Country display name for an ISO code; unknown codes pass through lowercased.
pub fn country_name(iso: &str) -> String {
    let iso = iso.trim().to_uppercase();
    COUNTRY_NAMES
        .iter()
        .find(|(code, _)| *code == iso)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| iso.to_lowercase())
}

/// Indicator name as Trading Economics spells it
pub fn indicator_term(code: IndicatorCode) -> &'static str {
    match code {
        IndicatorCode::Cpi => "consumer price index cpi",
        IndicatorCode::Ppi => "producer prices",
        IndicatorCode::InterestRate => "interest rate",
        IndicatorCode::Gdp => "gdp growth rate",
    }
}

/// Client for `/historical/country/{country}/indicator/{indicator}`
pub struct TradingEconomicsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TradingEconomicsClient {
    pub fn new(client: reqwest::Client, config: &FileProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
        }
    }

    fn historical_url(&self, query: &IndicatorQuery, key: &str) -> Result<Url, ProviderError> {
        let country = country_name(&query.country);
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ProviderError::invalid(PROVIDER, e))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::invalid(PROVIDER, "base URL cannot carry a path"))?
            .pop_if_empty()
            .extend([
                "historical",
                "country",
                country.as_str(),
                "indicator",
                indicator_term(query.code),
            ]);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("c", key).append_pair("f", "json");
            if let Some(start) = query.start {
                pairs.append_pair("d1", &start.to_string());
            }
            if let Some(end) = query.end {
                pairs.append_pair("d2", &end.to_string());
            }
        }
        Ok(url)
    }
}

/// Parse a historical body into points. Rows without a value are skipped.
pub fn parse_historical(body: &Value) -> Result<Vec<ChartPoint>, ProviderError> {
    let rows = body
        .as_array()
        .ok_or_else(|| ProviderError::invalid(PROVIDER, "expected a JSON array"))?;

    let mut points = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(value) = row.get("Value").and_then(Value::as_f64) else {
            continue;
        };
        let raw_date = row
            .get("DateTime")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::invalid(PROVIDER, "row without DateTime"))?;
        let date = raw_date
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .ok_or_else(|| {
                ProviderError::invalid(PROVIDER, format!("bad DateTime '{}'", raw_date))
            })?;
        points.push(ChartPoint::new(date, value));
    }
    Ok(points)
}

#[async_trait]
impl IndicatorProvider for TradingEconomicsClient {
    async fn series(&self, query: &IndicatorQuery) -> Result<Vec<ChartPoint>, ProviderError> {
        let key = require_key(PROVIDER, &self.api_key)?;
        let url = self.historical_url(query, key)?;
        debug!(indicator = %query.code, country = %query.country, "Trading Economics request");

        let points = parse_historical(&send_json(PROVIDER, self.client.get(url)).await?)?;
        if points.is_empty() {
            return Err(ProviderError::empty(
                PROVIDER,
                format!("no {} observations for {}", query.code, query.country),
            ));
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finquery_domain::parse_date;
    use serde_json::json;

    fn client(base: &str) -> TradingEconomicsClient {
        let config = FileProviderConfig {
            api_key_env: "FINQUERY_TEST_UNSET_TE_KEY".to_string(),
            api_key: Some("guest:guest".to_string()),
            base_url: base.to_string(),
        };
        TradingEconomicsClient::new(reqwest::Client::new(), &config)
    }

    #[test]
    fn test_country_names() {
        assert_eq!(country_name("cn"), "china");
        assert_eq!(country_name("US"), "united states");
        assert_eq!(country_name("MX"), "mx");
    }

    #[test]
    fn test_historical_url_encodes_names() {
        let query = IndicatorQuery::new(IndicatorCode::Cpi, "US").with_range(
            Some(parse_date("2023-01-01").unwrap()),
            Some(parse_date("2023-12-31").unwrap()),
        );
        let url = client("https://api.tradingeconomics.com/")
            .historical_url(&query, "guest:guest")
            .unwrap();

        assert_eq!(
            url.path(),
            "/historical/country/united%20states/indicator/consumer%20price%20index%20cpi"
        );
        let query_string = url.query().unwrap();
        assert!(query_string.contains("f=json"));
        assert!(query_string.contains("d1=2023-01-01"));
        assert!(query_string.contains("d2=2023-12-31"));
    }

    #[test]
    fn test_open_range_omits_dates() {
        let query = IndicatorQuery::new(IndicatorCode::Gdp, "CN");
        let url = client("https://api.tradingeconomics.com")
            .historical_url(&query, "k")
            .unwrap();
        assert!(!url.query().unwrap().contains("d1="));
    }

    #[test]
    fn test_parse_historical_skips_nulls() {
        let body = json!([
            {"Country": "China", "Category": "GDP Growth Rate", "DateTime": "2023-12-31T00:00:00", "Value": 1.0},
            {"Country": "China", "Category": "GDP Growth Rate", "DateTime": "2024-03-31T00:00:00", "Value": null},
            {"Country": "China", "Category": "GDP Growth Rate", "DateTime": "2024-06-30T00:00:00", "Value": 0.7}
        ]);
        let points = parse_historical(&body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].date.to_string(), "2024-06-30");
        assert_eq!(points[1].value, 0.7);
    }

    #[test]
    fn test_parse_historical_rejects_objects() {
        let err = parse_historical(&json!({"Message": "No Access"})).unwrap_err();
        assert!(matches!(err, ProviderError::Invalid { .. }));
    }
}
