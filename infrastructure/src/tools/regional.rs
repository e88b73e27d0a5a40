//! Synthetic regional tools: announcements, market sentiment and the
//! regional indicator fallback.
//!
//! No live provider covers sub-national regions, so these tools generate
//! plausible data from a random generator seeded by the request itself.
//! The same `(region, indicator)` always yields the same data for a given
//! anchor date, and every payload is flagged `"synthetic": true`.

use crate::tools::indicator::{indicator_code_arg, series_payload};
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use chrono::{Datelike, Duration, Months, NaiveDate, Utc};
use finquery_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter},
    value_objects::{ToolError, ToolOutcome},
};
use finquery_domain::{
    Announcement, ChartPoint, ChartSeries, IndicatorCode, SentimentLabel, SentimentReading,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::{DefaultHasher, Hash, Hasher};

const ANNOUNCEMENT_TEMPLATES: &[(&str, &str)] = &[
    ("Policy", "{} issues measures to support small and medium enterprises"),
    ("Infrastructure", "{} approves new transport infrastructure investment plan"),
    ("Finance", "{} finance bureau publishes quarterly fiscal report"),
    ("Trade", "{} announces export promotion program for local manufacturers"),
    ("Technology", "{} launches innovation fund for high-tech industries"),
    ("Real Estate", "{} adjusts housing purchase requirements"),
    ("Energy", "{} sets targets for renewable energy capacity"),
];

const INDICATOR_MONTHS: u32 = 12;

fn region_parameter() -> ToolParameter {
    ToolParameter::new("region", "Region or province name, e.g. Guangdong", true)
}

/// Create the [`ToolDefinition`] for `get_regional_announcements`.
pub fn regional_announcements_definition() -> ToolDefinition {
    ToolDefinition::for_kind(
        ToolKind::RegionalAnnouncements,
        "Get recent government and policy announcements for a region.",
    )
    .with_parameter(region_parameter())
}

/// Create the [`ToolDefinition`] for `get_market_sentiment`.
pub fn market_sentiment_definition() -> ToolDefinition {
    ToolDefinition::for_kind(
        ToolKind::MarketSentiment,
        "Get the current investor sentiment (bearish, neutral or bullish) for a region's market.",
    )
    .with_parameter(region_parameter())
}

/// Create the [`ToolDefinition`] for `get_regional_indicator`.
pub fn regional_indicator_definition() -> ToolDefinition {
    ToolDefinition::for_kind(
        ToolKind::RegionalIndicator,
        "Get a macroeconomic indicator series for a region or province that national \
         statistics do not cover.",
    )
    .with_parameter(region_parameter())
    .with_parameter(ToolParameter::new(
        "indicator_code",
        "One of CPI, PPI, INTEREST_RATE, GDP",
        true,
    ))
}

/// Seeded generator shared by the three regional tools.
#[derive(Debug, Clone)]
pub struct SyntheticRegion {
    anchor: NaiveDate,
}

impl Default for SyntheticRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticRegion {
    /// Generator anchored at today's date (UTC).
    pub fn new() -> Self {
        Self {
            anchor: Utc::now().date_naive(),
        }
    }

    pub fn with_anchor(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    fn rng(&self, region: &str, salt: &str) -> StdRng {
        let mut hasher = DefaultHasher::new();
        region.trim().to_lowercase().hash(&mut hasher);
        salt.hash(&mut hasher);
        self.anchor.hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }

    pub fn announcements(&self, region: &str) -> Vec<Announcement> {
        let mut rng = self.rng(region, "announcements");
        let count = rng.gen_range(3..=5);

        let mut announcements: Vec<Announcement> = (0..count)
            .map(|_| {
                let (category, template) =
                    ANNOUNCEMENT_TEMPLATES[rng.gen_range(0..ANNOUNCEMENT_TEMPLATES.len())];
                Announcement {
                    region: region.to_string(),
                    title: template.replace("{}", region),
                    category: category.to_string(),
                    date: self.anchor - Duration::days(rng.gen_range(0..30)),
                }
            })
            .collect();
        announcements.sort_by(|a, b| b.date.cmp(&a.date));
        announcements
    }

    pub fn sentiment(&self, region: &str) -> SentimentReading {
        let mut rng = self.rng(region, "sentiment");
        let score = round2(rng.gen_range(-1.0..=1.0));
        SentimentReading {
            region: region.to_string(),
            score,
            label: SentimentLabel::from_score(score),
            sample_size: rng.gen_range(200..2000),
        }
    }

    /// Twelve monthly observations ending in the anchor's month, oldest first.
    pub fn indicator(&self, region: &str, code: IndicatorCode) -> Vec<ChartPoint> {
        let mut rng = self.rng(region, code.code());
        let (base, step) = match code {
            IndicatorCode::Cpi => (2.0, 0.3),
            IndicatorCode::Ppi => (0.5, 0.6),
            IndicatorCode::InterestRate => (3.5, 0.1),
            IndicatorCode::Gdp => (5.0, 0.4),
        };

        let month_start = self.anchor.with_day(1).unwrap_or(self.anchor);
        let mut value: f64 = base + rng.gen_range(-1.0..=1.0);
        (0..INDICATOR_MONTHS)
            .rev()
            .filter_map(|back| month_start.checked_sub_months(Months::new(back)))
            .map(|date| {
                value += rng.gen_range(-step..=step);
                ChartPoint::new(date, round2(value))
            })
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn region_arg(call: &ToolCall) -> Result<&str, ToolError> {
    call.require_string("region")
        .map_err(ToolError::invalid_argument)
}

fn synthetic_payload<T: serde::Serialize + ?Sized>(
    value: &T,
) -> Result<serde_json::Value, ToolError> {
    let mut payload = super::to_payload(value)?;
    payload["synthetic"] = serde_json::json!(true);
    Ok(payload)
}

/// `get_regional_announcements`
#[derive(Default)]
pub struct RegionalAnnouncementsTool {
    generator: SyntheticRegion,
}

impl RegionalAnnouncementsTool {
    pub fn new(generator: SyntheticRegion) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ToolHandler for RegionalAnnouncementsTool {
    fn kind(&self) -> ToolKind {
        ToolKind::RegionalAnnouncements
    }

    fn definition(&self) -> ToolDefinition {
        regional_announcements_definition()
    }

    async fn run(&self, call: &ToolCall) -> ToolOutcome {
        let name = ToolKind::RegionalAnnouncements.name();
        let result = region_arg(call).and_then(|region| {
            let announcements = self.generator.announcements(region);
            synthetic_payload(&serde_json::json!({
                "region": region,
                "announcements": super::to_payload(&announcements)?,
            }))
        });
        match result {
            Ok(body) => ToolOutcome::success(name, body),
            Err(e) => ToolOutcome::failure(name, e),
        }
    }
}

/// `get_market_sentiment`
#[derive(Default)]
pub struct MarketSentimentTool {
    generator: SyntheticRegion,
}

impl MarketSentimentTool {
    pub fn new(generator: SyntheticRegion) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ToolHandler for MarketSentimentTool {
    fn kind(&self) -> ToolKind {
        ToolKind::MarketSentiment
    }

    fn definition(&self) -> ToolDefinition {
        market_sentiment_definition()
    }

    async fn run(&self, call: &ToolCall) -> ToolOutcome {
        let name = ToolKind::MarketSentiment.name();
        let result = region_arg(call)
            .and_then(|region| synthetic_payload(&self.generator.sentiment(region)));
        match result {
            Ok(body) => ToolOutcome::success(name, body),
            Err(e) => ToolOutcome::failure(name, e),
        }
    }
}

/// `get_regional_indicator`
#[derive(Default)]
pub struct RegionalIndicatorTool {
    generator: SyntheticRegion,
}

impl RegionalIndicatorTool {
    pub fn new(generator: SyntheticRegion) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ToolHandler for RegionalIndicatorTool {
    fn kind(&self) -> ToolKind {
        ToolKind::RegionalIndicator
    }

    fn definition(&self) -> ToolDefinition {
        regional_indicator_definition()
    }

    async fn run(&self, call: &ToolCall) -> ToolOutcome {
        let name = ToolKind::RegionalIndicator.name();
        let region = match region_arg(call) {
            Ok(r) => r,
            Err(e) => return ToolOutcome::failure(name, e),
        };
        let code = match indicator_code_arg(call) {
            Ok(c) => c,
            Err(e) => return ToolOutcome::failure(name, e),
        };

        let points = self.generator.indicator(region, code);
        match series_payload(code, region, &points) {
            Ok(mut body) => {
                body["synthetic"] = serde_json::json!(true);
                ToolOutcome::success(name, body).with_chart_series(ChartSeries::economic(points))
            }
            Err(e) => ToolOutcome::failure(name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> SyntheticRegion {
        SyntheticRegion::with_anchor(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    fn region_call(kind: ToolKind, region: &str) -> ToolCall {
        ToolCall::for_kind(kind).with_arg("region", region)
    }

    #[test]
    fn test_same_region_same_data() {
        let generator = generator();
        assert_eq!(
            generator.announcements("Guangdong"),
            generator.announcements("Guangdong")
        );
        assert_eq!(
            generator.sentiment("Sichuan").score,
            generator.sentiment(" sichuan ").score
        );
        assert_eq!(
            generator.indicator("Zhejiang", IndicatorCode::Cpi),
            generator.indicator("Zhejiang", IndicatorCode::Cpi)
        );
    }

    #[test]
    fn test_indicator_seed_includes_code() {
        let generator = generator();
        assert_ne!(
            generator.indicator("Zhejiang", IndicatorCode::Cpi),
            generator.indicator("Zhejiang", IndicatorCode::Gdp)
        );
    }

    #[test]
    fn test_indicator_is_monthly_and_ordered() {
        let points = generator().indicator("Hubei", IndicatorCode::Gdp);
        assert_eq!(points.len(), 12);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(points.last().unwrap().date.to_string(), "2024-06-01");
        assert_eq!(points.first().unwrap().date.to_string(), "2023-07-01");
    }

    #[test]
    fn test_sentiment_label_matches_score() {
        let reading = generator().sentiment("Jiangsu");
        assert!((-1.0..=1.0).contains(&reading.score));
        assert_eq!(reading.label, SentimentLabel::from_score(reading.score));
    }

    #[tokio::test]
    async fn test_announcements_tool_payload() {
        let tool = RegionalAnnouncementsTool::new(generator());
        let outcome = tool
            .run(&region_call(ToolKind::RegionalAnnouncements, "Fujian"))
            .await;

        let body = outcome.success_payload().unwrap();
        assert_eq!(body["synthetic"], true);
        let list = body["announcements"].as_array().unwrap();
        assert!((3..=5).contains(&list.len()));
        assert!(list[0]["title"].as_str().unwrap().contains("Fujian"));
        assert!(outcome.chart_series().is_none());
    }

    #[tokio::test]
    async fn test_sentiment_tool_payload() {
        let tool = MarketSentimentTool::new(generator());
        let outcome = tool
            .run(&region_call(ToolKind::MarketSentiment, "Shanghai"))
            .await;

        let body = outcome.success_payload().unwrap();
        assert_eq!(body["region"], "Shanghai");
        assert_eq!(body["synthetic"], true);
        assert!(body["label"].is_string());
    }

    #[tokio::test]
    async fn test_regional_indicator_produces_economic_series() {
        let tool = RegionalIndicatorTool::new(generator());
        let call = region_call(ToolKind::RegionalIndicator, "Anhui").with_arg("indicator_code", "cpi");

        let outcome = tool.run(&call).await;

        let series = outcome.chart_series().unwrap();
        assert!(!series.is_stock());
        assert_eq!(series.len(), 12);
        assert_eq!(outcome.success_payload().unwrap()["indicator_code"], "CPI");
    }

    #[tokio::test]
    async fn test_regional_indicator_rejects_unknown_code() {
        let tool = RegionalIndicatorTool::new(generator());
        let call =
            region_call(ToolKind::RegionalIndicator, "Anhui").with_arg("indicator_code", "M2");

        let outcome = tool.run(&call).await;
        assert_eq!(outcome.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_blank_region_is_invalid() {
        let tool = MarketSentimentTool::new(generator());
        let outcome = tool.run(&region_call(ToolKind::MarketSentiment, "  ")).await;
        assert_eq!(outcome.error().unwrap().code, "INVALID_ARGUMENT");
    }
}
