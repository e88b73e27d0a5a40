//! HTTP clients for the upstream data providers.
//!
//! Each client implements one data-provider port from the application layer
//! and reads its credential from the `[providers.*]` config section. A missing
//! key is reported per call as [`ProviderError::MissingCredential`], never at
//! startup.
//!
//! | Client | Port | Upstream |
//! |--------|------|----------|
//! | [`AlphaVantageClient`] | `MarketDataProvider` | Alpha Vantage |
//! | [`NewsApiClient`] | `NewsProvider` | NewsAPI |
//! | [`TradingEconomicsClient`] | `IndicatorProvider` | Trading Economics |
//! | [`OpenAiClient`] | `ImageProvider`, `SpeechProvider` | OpenAI |
//! | [`OcrSpaceClient`] | `OcrProvider` | OCR.space |

pub mod alpha_vantage;
pub mod news_api;
pub mod ocr_space;
pub mod openai;
pub mod trading_economics;

pub use alpha_vantage::AlphaVantageClient;
pub use news_api::NewsApiClient;
pub use ocr_space::OcrSpaceClient;
pub use openai::OpenAiClient;
pub use trading_economics::TradingEconomicsClient;

use crate::config::FileHttpConfig;
use finquery_application::ports::data_providers::ProviderError;
use reqwest::StatusCode;

/// Build the HTTP client shared by the gateway and every provider.
pub fn build_http_client(config: &FileHttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        "finquery/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// The configured key, or a missing-credential error naming the provider.
pub(crate) fn require_key<'a>(
    provider: &str,
    key: &'a Option<String>,
) -> Result<&'a str, ProviderError> {
    key.as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ProviderError::MissingCredential(provider.to_string()))
}

fn truncate_body(body: &str) -> String {
    finquery_domain::util::preview(body.trim(), 300).into_owned()
}

/// Map a non-success status to a provider error.
pub(crate) fn status_error(provider: &str, status: StatusCode, body: &str) -> ProviderError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
            provider: provider.to_string(),
            message: truncate_body(body),
        },
        _ => ProviderError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: truncate_body(body),
        },
    }
}

/// Send a request and decode a JSON body, mapping transport and status failures.
pub(crate) async fn send_json(
    provider: &str,
    request: reqwest::RequestBuilder,
) -> Result<serde_json::Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::transport(provider, e))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::transport(provider, e))?;

    if !status.is_success() {
        return Err(status_error(provider, status, &body));
    }
    serde_json::from_str(&body).map_err(|e| ProviderError::invalid(provider, e))
}
