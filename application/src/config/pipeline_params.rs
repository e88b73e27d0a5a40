//! Pipeline parameters: per-query behavior knobs.
//!
//! [`PipelineParams`] groups the static parameters that shape how a query
//! is answered. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Query pipeline parameters.
///
/// | Field | Used by |
/// |-------|---------|
/// | `audio_enabled` | answer-query (post-processing) |
/// | `history_points` | historical series executor |
/// | `news_page_size` | news executor |
/// | `default_country` | indicator executor, direct indicator lookup |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Attempt speech synthesis of the final summary.
    pub audio_enabled: bool,
    /// Most recent bars kept from a historical series.
    pub history_points: usize,
    /// Articles requested from the news provider.
    pub news_page_size: usize,
    /// Country used when an indicator lookup names none.
    pub default_country: String,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            history_points: 100,
            news_page_size: 5,
            default_country: "CN".to_string(),
        }
    }
}

impl PipelineParams {
    // ==================== Builder Methods ====================

    pub fn with_audio_enabled(mut self, enabled: bool) -> Self {
        self.audio_enabled = enabled;
        self
    }

    pub fn with_history_points(mut self, points: usize) -> Self {
        self.history_points = points.max(1);
        self
    }

    pub fn with_news_page_size(mut self, size: usize) -> Self {
        self.news_page_size = size.max(1);
        self
    }

    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into().trim().to_uppercase();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PipelineParams::default();
        assert!(params.audio_enabled);
        assert_eq!(params.history_points, 100);
        assert_eq!(params.news_page_size, 5);
        assert_eq!(params.default_country, "CN");
    }

    #[test]
    fn test_builders_clamp_and_normalize() {
        let params = PipelineParams::default()
            .with_history_points(0)
            .with_news_page_size(0)
            .with_default_country(" us ");
        assert_eq!(params.history_points, 1);
        assert_eq!(params.news_page_size, 1);
        assert_eq!(params.default_country, "US");
    }
}
