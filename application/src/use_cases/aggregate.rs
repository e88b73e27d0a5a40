//! Response aggregation.
//!
//! Collects the summary and side artifacts into one [`ResponseEnvelope`].
//! Only one tool runs per query, so at most one of chart series, image and
//! articles is ever present. Audio is independent of the tool.

use finquery_domain::tool::entities::{ToolCall, ToolKind};
use finquery_domain::tool::payload;
use finquery_domain::tool::value_objects::ToolOutcome;
use finquery_domain::{Article, ResponseEnvelope};
use tracing::warn;

/// Builds the final envelope for a query.
#[derive(Debug, Clone, Default)]
pub struct ResponseAggregator;

impl ResponseAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(
        &self,
        summary: String,
        tool: Option<(&ToolCall, &ToolOutcome)>,
        audio_url: Option<String>,
    ) -> ResponseEnvelope {
        let mut envelope = ResponseEnvelope::new(summary);

        if let Some((call, outcome)) = tool
            && let Some(kind) = call.kind()
            && let Some(body) = outcome.success_payload()
        {
            match kind {
                k if k.produces_chart() => {
                    if let Some(series) = outcome.chart_series().filter(|s| !s.is_empty()) {
                        envelope = envelope.with_chart_series(series.clone());
                    }
                }
                ToolKind::ImageGeneration => {
                    if let Some(url) = body
                        .get(payload::IMAGE_URL)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                    {
                        envelope = envelope.with_image_url(url);
                    }
                }
                ToolKind::FinancialNews => {
                    let articles = body
                        .get(payload::ARTICLES)
                        .cloned()
                        .map(serde_json::from_value::<Vec<Article>>)
                        .transpose();
                    match articles {
                        Ok(Some(articles)) if !articles.is_empty() => {
                            envelope = envelope.with_articles(articles);
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Discarding malformed article list: {}", e),
                    }
                }
                _ => {}
            }
        }

        if let Some(url) = audio_url.filter(|u| !u.is_empty()) {
            envelope = envelope.with_audio_url(url);
        }

        envelope
    }
}
