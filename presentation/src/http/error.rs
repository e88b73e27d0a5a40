//! HTTP error responses
//!
//! Every error leaves the server as `{ "error": "...", "details": "..." }`
//! with `details` omitted when there is nothing more to say.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use finquery_application::{AnswerQueryError, GatewayError, LookupIndicatorError};
use finquery_domain::ToolError;
use serde::Serialize;
use tracing::{error, warn};

const CREDENTIAL_PROBLEM: &str =
    "The assistant is not configured correctly (missing or invalid API credentials).";
const RATE_LIMITED: &str = "The assistant is receiving too many requests. Please try again shortly.";
const UPSTREAM_PROBLEM: &str =
    "An upstream service did not respond as expected. Please try again later.";
const GENERIC_PROBLEM: &str = "Sorry, something went wrong while answering your question.";

/// Error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An HTTP status plus its JSON error body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                error: error.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.body.details = Some(details.into());
        self
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn bad_gateway(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ApiErrorBody {
        &self.body
    }

    /// Map a tool-level error from a direct (model-free) endpoint.
    pub fn from_tool_error(err: ToolError) -> Self {
        let status = match err.code.as_str() {
            "INVALID_ARGUMENT" => StatusCode::BAD_REQUEST,
            "EMPTY_RESULT" | "NOT_FOUND" => StatusCode::UNPROCESSABLE_ENTITY,
            "MISSING_CREDENTIAL" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_GATEWAY,
        };
        let api = Self::new(status, err.message);
        match err.details {
            Some(details) => api.with_details(details),
            None => api,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.body.error, details = ?self.body.details, "Request failed");
        } else {
            warn!(status = %self.status, error = %self.body.error, "Request rejected");
        }
        (self.status, Json(self.body)).into_response()
    }
}

/// Pick a user-facing message for an unexpected gateway failure.
pub fn friendly_message(err: &GatewayError) -> &'static str {
    match err {
        GatewayError::Unauthorized(_) => CREDENTIAL_PROBLEM,
        GatewayError::RateLimited(_) => RATE_LIMITED,
        GatewayError::ConnectionError(_) | GatewayError::Timeout => UPSTREAM_PROBLEM,
        // A failed upstream call may still carry a credential or quota complaint
        GatewayError::RequestFailed(message) | GatewayError::InvalidResponse(message) => {
            match classify_text(message) {
                GENERIC_PROBLEM => UPSTREAM_PROBLEM,
                found => found,
            }
        }
        GatewayError::Other(message) => classify_text(message),
    }
}

/// Classify free-form error text.
fn classify_text(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if mentions(&["api key", "api_key", "apikey", "credential", "unauthorized", "permission", "401", "403"]) {
        CREDENTIAL_PROBLEM
    } else if mentions(&["rate limit", "quota", "too many requests", "429"]) {
        RATE_LIMITED
    } else if mentions(&["http", "status", "timeout", "connection"]) {
        UPSTREAM_PROBLEM
    } else {
        GENERIC_PROBLEM
    }
}

impl From<AnswerQueryError> for ApiError {
    fn from(err: AnswerQueryError) -> Self {
        match err {
            AnswerQueryError::InvalidQuery(e) => Self::bad_request(e.to_string()),
            AnswerQueryError::InvalidAiResponse => {
                Self::bad_gateway("Invalid AI response")
                    .with_details("function call without a name")
            }
            AnswerQueryError::UnrecognizedFunction(name) => {
                Self::internal("Unrecognized function").with_details(name)
            }
            AnswerQueryError::Gateway(e) => {
                Self::internal(friendly_message(&e)).with_details(e.to_string())
            }
        }
    }
}

impl From<LookupIndicatorError> for ApiError {
    fn from(err: LookupIndicatorError) -> Self {
        match err {
            LookupIndicatorError::InvalidInput(message) => Self::bad_request(message),
            LookupIndicatorError::Provider(e) => {
                let api = Self::bad_gateway(e.message);
                match e.details {
                    Some(details) => api.with_details(details),
                    None => api,
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid request body").with_details(rejection.body_text())
    }
}
