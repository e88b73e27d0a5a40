//! External data provider ports
//!
//! One trait per upstream capability. Tool executors and use cases depend on
//! these traits; the HTTP clients that implement them live in the
//! infrastructure layer, so tests can substitute fakes.

use async_trait::async_trait;
use finquery_domain::{Article, ChartPoint, IndicatorQuery, Period, PriceBar, StockQuote, ToolError};
use thiserror::Error;

/// Failure of a single upstream call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("No API key configured for {0}")]
    MissingCredential(String),

    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} rate limit reached: {message}")]
    RateLimited { provider: String, message: String },

    #[error("{provider} returned no data: {message}")]
    EmptyPayload { provider: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{provider} returned an unexpected payload: {message}")]
    Invalid { provider: String, message: String },
}

impl ProviderError {
    pub fn transport(provider: &str, message: impl ToString) -> Self {
        Self::Transport {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    pub fn empty(provider: &str, message: impl Into<String>) -> Self {
        Self::EmptyPayload {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid(provider: &str, message: impl ToString) -> Self {
        Self::Invalid {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    /// Convert into the error half of a tool outcome.
    ///
    /// `what` names the thing being fetched ("quote for AAPL") and becomes the
    /// user-facing message; the provider detail goes into `details`.
    pub fn into_tool_error(self, what: &str) -> ToolError {
        let detail = self.to_string();
        match self {
            ProviderError::MissingCredential(provider) => ToolError::missing_credential(provider),
            ProviderError::NotFound(resource) => ToolError::not_found(resource),
            ProviderError::EmptyPayload { .. } => {
                ToolError::empty_result(format!("No data returned for {}", what))
                    .with_details(detail)
            }
            ProviderError::Transport { .. }
            | ProviderError::Status { .. }
            | ProviderError::RateLimited { .. }
            | ProviderError::Invalid { .. } => {
                ToolError::upstream(format!("Failed to fetch {}", what)).with_details(detail)
            }
        }
    }
}

/// Quotes and historical prices
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest quote for a ticker
    async fn quote(&self, ticker: &str) -> Result<StockQuote, ProviderError>;

    /// Price bars for a ticker, in provider order
    async fn history(&self, ticker: &str, period: Period) -> Result<Vec<PriceBar>, ProviderError>;
}

/// Keyword article search
#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<Article>, ProviderError>;
}

/// Macro-indicator time series
#[async_trait]
pub trait IndicatorProvider: Send + Sync {
    async fn series(&self, query: &IndicatorQuery) -> Result<Vec<ChartPoint>, ProviderError>;
}

/// Text-to-image generation
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate an image and return it as a `data:` URL
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Text-to-speech synthesis
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Speak `text` and return the audio as a `data:` URL
    async fn synthesize(&self, text: &str) -> Result<String, ProviderError>;
}

/// An uploaded image handed to OCR
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Optical character recognition
#[async_trait]
pub trait OcrProvider: Send + Sync {
    async fn extract_text(&self, image: &ImageUpload) -> Result<String, ProviderError>;
}
