//! Error types for the Gemini adapter

use finquery_application::ports::llm_gateway::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when calling the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("No API key configured for the model (set {0})")]
    MissingApiKey(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey(_) => GatewayError::Unauthorized(err.to_string()),
            GeminiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            GeminiError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            GeminiError::Serialization(e) => GatewayError::InvalidResponse(e.to_string()),
            GeminiError::Api { status, message } => match status {
                401 | 403 => GatewayError::Unauthorized(message),
                // An invalid key is reported as 400 INVALID_ARGUMENT
                400 if mentions_api_key(&message) => GatewayError::Unauthorized(message),
                429 => GatewayError::RateLimited(message),
                _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, message)),
            },
            GeminiError::UnexpectedResponse(msg) => GatewayError::InvalidResponse(msg),
        }
    }
}

fn mentions_api_key(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["api key", "api_key", "apikey"]
        .iter()
        .any(|needle| lower.contains(needle))
}
