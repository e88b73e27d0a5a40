//! NewsAPI `/v2/everything` client

use super::{require_key, send_json};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use finquery_application::ports::data_providers::{NewsProvider, ProviderError};
use finquery_domain::Article;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const PROVIDER: &str = "NewsAPI";

/// NewsAPI caps `pageSize` at 100.
const MAX_PAGE_SIZE: usize = 100;

/// Placeholder NewsAPI uses for articles pulled after indexing.
const REMOVED: &str = "[Removed]";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(default)]
    name: Option<String>,
}

impl RawArticle {
    fn into_article(self) -> Option<Article> {
        let title = self.title.filter(|t| !t.trim().is_empty() && t != REMOVED)?;
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        Some(Article {
            title,
            description: self.description.filter(|d| !d.trim().is_empty() && d != REMOVED),
            url,
            source: self.source.and_then(|s| s.name),
            published_at: self.published_at,
        })
    }
}

/// Client for NewsAPI keyword search
pub struct NewsApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl NewsApiClient {
    pub fn new(client: reqwest::Client, config: &FileProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
        }
    }
}

/// Parse an `/everything` body, dropping removed or incomplete articles.
pub fn parse_articles(body: Value) -> Result<Vec<Article>, ProviderError> {
    let response: EverythingResponse =
        serde_json::from_value(body).map_err(|e| ProviderError::invalid(PROVIDER, e))?;

    if response.status != "ok" {
        let message = response
            .message
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(match response.code.as_deref() {
            Some("rateLimited") => ProviderError::RateLimited {
                provider: PROVIDER.to_string(),
                message,
            },
            Some("apiKeyInvalid") | Some("apiKeyMissing") | Some("apiKeyDisabled") => {
                ProviderError::MissingCredential(PROVIDER.to_string())
            }
            _ => ProviderError::invalid(PROVIDER, message),
        });
    }

    Ok(response
        .articles
        .into_iter()
        .filter_map(RawArticle::into_article)
        .collect())
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<Article>, ProviderError> {
        let key = require_key(PROVIDER, &self.api_key)?;
        let page_size = limit.clamp(1, MAX_PAGE_SIZE).to_string();
        debug!(keyword, page_size = %page_size, "NewsAPI search");

        let request = self
            .client
            .get(format!("{}/v2/everything", self.base_url))
            .header("X-Api-Key", key)
            .query(&[
                ("q", keyword),
                ("pageSize", page_size.as_str()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
            ]);
        let mut articles = parse_articles(send_json(PROVIDER, request).await?)?;
        articles.truncate(limit);
        Ok(articles)
    }
}
