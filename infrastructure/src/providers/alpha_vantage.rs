//! Alpha Vantage client: `GLOBAL_QUOTE` and `TIME_SERIES_*`.
//!
//! Alpha Vantage answers almost everything with HTTP 200, including errors.
//! The body decides: `Error Message` means an unknown symbol, `Note` or
//! `Information` means the key hit its rate limit.

use super::{require_key, send_json};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use chrono::NaiveDate;
use finquery_application::ports::data_providers::{MarketDataProvider, ProviderError};
use finquery_domain::{Period, PriceBar, StockQuote};
use serde_json::Value;
use tracing::debug;

const PROVIDER: &str = "Alpha Vantage";

/// Client for the Alpha Vantage `/query` endpoint
pub struct AlphaVantageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl AlphaVantageClient {
    pub fn new(client: reqwest::Client, config: &FileProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
        }
    }

    async fn query(&self, function: &str, symbol: &str) -> Result<Value, ProviderError> {
        let key = require_key(PROVIDER, &self.api_key)?;
        debug!(function, symbol, "Alpha Vantage request");

        let request = self
            .client
            .get(format!("{}/query", self.base_url))
            .query(&[("function", function), ("symbol", symbol), ("apikey", key)]);
        let body = send_json(PROVIDER, request).await?;
        check_body(symbol, &body)?;
        Ok(body)
    }
}

fn time_series_function(period: Period) -> (&'static str, &'static str) {
    match period {
        Period::Daily => ("TIME_SERIES_DAILY", "Time Series (Daily)"),
        Period::Weekly => ("TIME_SERIES_WEEKLY", "Weekly Time Series"),
        Period::Monthly => ("TIME_SERIES_MONTHLY", "Monthly Time Series"),
    }
}

/// Whether an in-body message complains about the `apikey` parameter.
///
/// Quota notices also name the key ("We have detected your API key as ..."),
/// so a mention alone is not enough.
fn rejects_api_key(message: &str) -> bool {
    let lower = message.to_lowercase();
    let names_key = lower.contains("apikey") || lower.contains("api key");
    let about_quota = lower.contains("rate limit") || lower.contains("call frequency");
    names_key
        && !about_quota
        && ["invalid", "missing", "demo", "claim your free"]
            .iter()
            .any(|hint| lower.contains(hint))
}

/// Detect errors reported inside a 200 body.
///
/// Key problems arrive as either `Error Message` or `Information`, so the
/// text is checked before the key decides the variant.
fn check_body(symbol: &str, body: &Value) -> Result<(), ProviderError> {
    let text = |key: &str| body.get(key).and_then(Value::as_str);

    if let Some(message) = text("Error Message").or_else(|| text("Information"))
        && rejects_api_key(message)
    {
        return Err(ProviderError::MissingCredential(PROVIDER.to_string()));
    }
    if body.get("Error Message").is_some() {
        return Err(ProviderError::NotFound(format!("symbol {}", symbol)));
    }
    if let Some(note) = text("Note").or_else(|| text("Information")) {
        return Err(ProviderError::RateLimited {
            provider: PROVIDER.to_string(),
            message: note.to_string(),
        });
    }
    Ok(())
}

fn field_f64(obj: &Value, key: &str) -> Result<f64, ProviderError> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().trim_end_matches('%'))
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| ProviderError::invalid(PROVIDER, format!("missing or bad field '{}'", key)))
}

fn field_u64(obj: &Value, key: &str) -> Result<u64, ProviderError> {
    obj.get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.trim().parse::<u64>().ok())
        .ok_or_else(|| ProviderError::invalid(PROVIDER, format!("missing or bad field '{}'", key)))
}

/// Parse a `GLOBAL_QUOTE` body. An empty quote object means an unknown symbol.
pub fn parse_global_quote(symbol: &str, body: &Value) -> Result<StockQuote, ProviderError> {
    let quote = body
        .get("Global Quote")
        .and_then(Value::as_object)
        .filter(|q| !q.is_empty())
        .map(|q| Value::Object(q.clone()))
        .ok_or_else(|| ProviderError::NotFound(format!("symbol {}", symbol)))?;

    Ok(StockQuote {
        symbol: quote
            .get("01. symbol")
            .and_then(Value::as_str)
            .unwrap_or(symbol)
            .to_string(),
        open: field_f64(&quote, "02. open")?,
        high: field_f64(&quote, "03. high")?,
        low: field_f64(&quote, "04. low")?,
        price: field_f64(&quote, "05. price")?,
        volume: field_u64(&quote, "06. volume")?,
        latest_trading_day: quote
            .get("07. latest trading day")
            .and_then(Value::as_str)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        previous_close: field_f64(&quote, "08. previous close")?,
        change: field_f64(&quote, "09. change")?,
        change_percent: field_f64(&quote, "10. change percent")?,
    })
}

/// Parse a `TIME_SERIES_*` body into bars (unordered).
pub fn parse_time_series(period: Period, body: &Value) -> Result<Vec<PriceBar>, ProviderError> {
    let (_, key) = time_series_function(period);
    let series = body
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| ProviderError::invalid(PROVIDER, format!("missing '{}'", key)))?;

    series
        .iter()
        .map(|(date, bar)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| ProviderError::invalid(PROVIDER, format!("bad date '{}': {}", date, e)))?;
            Ok(PriceBar {
                date,
                open: field_f64(bar, "1. open")?,
                high: field_f64(bar, "2. high")?,
                low: field_f64(bar, "3. low")?,
                close: field_f64(bar, "4. close")?,
                volume: field_u64(bar, "5. volume")?,
            })
        })
        .collect()
}

#[async_trait]
impl MarketDataProvider for AlphaVantageClient {
    async fn quote(&self, ticker: &str) -> Result<StockQuote, ProviderError> {
        let body = self.query("GLOBAL_QUOTE", ticker).await?;
        parse_global_quote(ticker, &body)
    }

    async fn history(&self, ticker: &str, period: Period) -> Result<Vec<PriceBar>, ProviderError> {
        let (function, _) = time_series_function(period);
        let body = self.query(function, ticker).await?;
        parse_time_series(period, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_global_quote() {
        let body = json!({
            "Global Quote": {
                "01. symbol": "IBM",
                "02. open": "168.0000",
                "03. high": "170.2500",
                "04. low": "167.5000",
                "05. price": "169.8000",
                "06. volume": "4212345",
                "07. latest trading day": "2024-05-17",
                "08. previous close": "167.9000",
                "09. change": "1.9000",
                "10. change percent": "1.1316%"
            }
        });
        let quote = parse_global_quote("IBM", &body).unwrap();

        assert_eq!(quote.symbol, "IBM");
        assert_eq!(quote.price, 169.8);
        assert_eq!(quote.volume, 4_212_345);
        assert_eq!(quote.change_percent, 1.1316);
        assert_eq!(quote.latest_trading_day.unwrap().to_string(), "2024-05-17");
    }

    #[test]
    fn test_empty_quote_is_not_found() {
        let err = parse_global_quote("ZZZZ", &json!({"Global Quote": {}})).unwrap_err();
        assert_eq!(err, ProviderError::NotFound("symbol ZZZZ".to_string()));
    }

    #[test]
    fn test_parse_weekly_series() {
        let body = json!({
            "Meta Data": {"2. Symbol": "SPY"},
            "Weekly Time Series": {
                "2024-05-17": {"1. open": "520.0", "2. high": "531.0", "3. low": "519.0", "4. close": "529.5", "5. volume": "1000"},
                "2024-05-10": {"1. open": "511.0", "2. high": "522.0", "3. low": "510.0", "4. close": "520.8", "5. volume": "2000"}
            }
        });
        let bars = parse_time_series(Period::Weekly, &body).unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().any(|b| b.close == 529.5));
    }

    #[test]
    fn test_series_with_wrong_key_is_invalid() {
        let body = json!({"Time Series (Daily)": {}});
        let err = parse_time_series(Period::Monthly, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Invalid { .. }));
    }

    #[test]
    fn test_in_body_errors() {
        let not_found = check_body("ZZZZ", &json!({"Error Message": "Invalid API call."}));
        assert!(matches!(not_found, Err(ProviderError::NotFound(_))));

        let limited = check_body(
            "IBM",
            &json!({"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}),
        );
        assert!(matches!(limited, Err(ProviderError::RateLimited { .. })));

        let info = check_body("IBM", &json!({"Information": "premium endpoint"}));
        assert!(matches!(info, Err(ProviderError::RateLimited { .. })));

        assert!(check_body("IBM", &json!({"Global Quote": {}})).is_ok());
    }

    #[test]
    fn test_rejected_key_is_missing_credential() {
        let info = check_body(
            "IBM",
            &json!({"Information": "The **demo** API key is for demo purposes only. Please claim your free API key."}),
        );
        assert!(matches!(info, Err(ProviderError::MissingCredential(p)) if p == PROVIDER));

        let error = check_body(
            "IBM",
            &json!({"Error Message": "the parameter apikey is invalid or missing."}),
        );
        assert!(matches!(error, Err(ProviderError::MissingCredential(_))));

        let quota = check_body(
            "IBM",
            &json!({"Information": "We have detected your API key as XYZ and our standard API rate limit is 25 requests per day."}),
        );
        assert!(matches!(quota, Err(ProviderError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let config = FileProviderConfig {
            api_key: None,
            api_key_env: "FINQUERY_TEST_UNSET_AV_KEY".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        };
        let client = AlphaVantageClient::new(reqwest::Client::new(), &config);
        let err = client.quote("IBM").await.unwrap_err();
        assert_eq!(err, ProviderError::MissingCredential("Alpha Vantage".to_string()));
    }
}
