//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Upper bound on accepted query length, in characters.
pub const MAX_QUERY_CHARS: usize = 2000;

/// A free-text financial query from the client (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    content: String,
}

impl Query {
    /// Validate and wrap a query. Surrounding whitespace is trimmed.
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuery("query must not be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_QUERY_CHARS {
            return Err(DomainError::InvalidQuery(format!(
                "query exceeds {} characters",
                MAX_QUERY_CHARS
            )));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Query::parse(s)
    }
}
