//! The composite answer returned for one query

use crate::market::{Article, ChartSeries};
use serde::{Deserialize, Serialize};

/// Final output of the query pipeline.
///
/// `summary` is always present. Every other field is set only when the
/// corresponding artifact was actually produced during this query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Synthesized answer text
    pub summary: String,
    /// Chart series from a successful time-series tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_series: Option<ChartSeries>,
    /// Generated image reference (`data:` URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Spoken summary reference (`data:` URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Articles from the news tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<Article>>,
}

impl ResponseEnvelope {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Default::default()
        }
    }

    pub fn with_chart_series(mut self, series: ChartSeries) -> Self {
        self.chart_series = Some(series);
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    pub fn with_articles(mut self, articles: Vec<Article>) -> Self {
        self.articles = Some(articles);
        self
    }

    /// Whether any artifact beyond the summary is attached.
    pub fn has_artifacts(&self) -> bool {
        self.chart_series.is_some()
            || self.image_url.is_some()
            || self.audio_url.is_some()
            || self.articles.is_some()
    }
}
