//! `get_financial_news`: keyword article search.

use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use finquery_application::ports::data_providers::NewsProvider;
use finquery_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter},
    payload,
    value_objects::{ToolError, ToolOutcome},
};
use std::sync::Arc;
use tracing::debug;

/// Create the [`ToolDefinition`] for `get_financial_news`.
pub fn financial_news_definition() -> ToolDefinition {
    ToolDefinition::for_kind(
        ToolKind::FinancialNews,
        "Search recent financial news articles about a company, market or topic.",
    )
    .with_parameter(ToolParameter::new(
        "keyword",
        "Search keyword, e.g. Tesla or interest rates",
        true,
    ))
}

/// Article search backed by a [`NewsProvider`]
pub struct FinancialNewsTool {
    provider: Arc<dyn NewsProvider>,
    page_size: usize,
}

impl FinancialNewsTool {
    pub fn new(provider: Arc<dyn NewsProvider>) -> Self {
        Self {
            provider,
            page_size: 5,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

#[async_trait]
impl ToolHandler for FinancialNewsTool {
    fn kind(&self) -> ToolKind {
        ToolKind::FinancialNews
    }

    fn definition(&self) -> ToolDefinition {
        financial_news_definition()
    }

    async fn run(&self, call: &ToolCall) -> ToolOutcome {
        let name = ToolKind::FinancialNews.name();
        let keyword = match call.require_string("keyword") {
            Ok(k) => k,
            Err(e) => return ToolOutcome::failure(name, ToolError::invalid_argument(e)),
        };

        debug!(keyword, limit = self.page_size, "Searching news");
        let what = format!("news about {}", keyword);
        let mut articles = match self.provider.search(keyword, self.page_size).await {
            Ok(a) => a,
            Err(e) => return ToolOutcome::failure(name, e.into_tool_error(&what)),
        };
        articles.truncate(self.page_size);

        if articles.is_empty() {
            return ToolOutcome::failure(
                name,
                ToolError::empty_result(format!("No articles found for '{}'", keyword)),
            );
        }

        match super::to_payload(&articles) {
            Ok(list) => ToolOutcome::success(
                name,
                serde_json::json!({ "keyword": keyword, payload::ARTICLES: list }),
            ),
            Err(e) => ToolOutcome::failure(name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::FakeNews;
    use finquery_application::ports::data_providers::ProviderError;

    fn news_call(keyword: &str) -> ToolCall {
        ToolCall::for_kind(ToolKind::FinancialNews).with_arg("keyword", keyword)
    }

    #[tokio::test]
    async fn test_articles_bounded_by_page_size() {
        let provider = Arc::new(FakeNews::returning(20));
        let tool = FinancialNewsTool::new(provider.clone()).with_page_size(3);

        let outcome = tool.run(&news_call("tesla")).await;

        let articles = outcome.success_payload().unwrap()[payload::ARTICLES]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0]["title"], "tesla headline 0");
        assert_eq!(*provider.limits.lock().unwrap(), vec![3]);
        assert!(outcome.chart_series().is_none());
    }

    #[tokio::test]
    async fn test_no_articles_is_empty_result() {
        let tool = FinancialNewsTool::new(Arc::new(FakeNews::returning(0)));

        let outcome = tool.run(&news_call("obscure")).await;

        let error = outcome.error().unwrap();
        assert_eq!(error.code, "EMPTY_RESULT");
        assert!(error.message.contains("obscure"));
    }

    #[tokio::test]
    async fn test_missing_key_is_missing_credential() {
        let provider = FakeNews {
            error: Some(ProviderError::MissingCredential("NewsAPI".to_string())),
            ..FakeNews::returning(5)
        };
        let tool = FinancialNewsTool::new(Arc::new(provider));

        let outcome = tool.run(&news_call("tesla")).await;
        assert_eq!(outcome.error().unwrap().code, "MISSING_CREDENTIAL");
    }
}
