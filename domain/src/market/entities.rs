//! Market data entities returned by the live and synthetic tools

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Latest quote for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub previous_close: f64,
    pub change: f64,
    /// Percent change, e.g. `1.25` for +1.25%
    pub change_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_trading_day: Option<NaiveDate>,
}

/// One news article summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

/// A synthetic regional announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub region: String,
    pub title: String,
    pub category: String,
    pub date: NaiveDate,
}

/// Qualitative sentiment bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Bearish,
    Neutral,
    Bullish,
}

impl SentimentLabel {
    /// Bucket a score in `[-1.0, 1.0]`.
    pub fn from_score(score: f64) -> Self {
        if score <= -0.2 {
            SentimentLabel::Bearish
        } else if score >= 0.2 {
            SentimentLabel::Bullish
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// A synthetic sentiment reading for a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub region: String,
    /// Score in `[-1.0, 1.0]`
    pub score: f64,
    pub label: SentimentLabel,
    /// Number of synthetic posts the score is drawn from
    pub sample_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_buckets() {
        assert_eq!(SentimentLabel::from_score(-0.8), SentimentLabel::Bearish);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.19), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.2), SentimentLabel::Bullish);
    }

    #[test]
    fn test_article_omits_missing_fields() {
        let article = Article {
            title: "Rates hold".to_string(),
            description: None,
            url: "https://example.com/a".to_string(),
            source: Some("Wire".to_string()),
            published_at: None,
        };
        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["source"], "Wire");
    }
}
