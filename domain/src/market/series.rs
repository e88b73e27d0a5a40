//! Time-series value objects used for charting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sampling period for historical price lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Daily, Period::Weekly, Period::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "1d" | "d" => Ok(Period::Daily),
            "weekly" | "week" | "1w" | "w" => Ok(Period::Weekly),
            "monthly" | "month" | "1m" | "m" => Ok(Period::Monthly),
            other => Err(format!(
                "Unsupported period '{}'. Supported: daily, weekly, monthly",
                other
            )),
        }
    }
}

/// One OHLCV bar of a historical price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// One (date, value) observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A time-ordered series attached to a tool outcome for plotting.
///
/// Stock series keep the full OHLCV bar so clients can draw candles; economic
/// series are plain (date, value) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum ChartSeries {
    Stock(Vec<PriceBar>),
    Economic(Vec<ChartPoint>),
}

impl ChartSeries {
    /// Build a stock series, sorting bars oldest first.
    pub fn stock(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        ChartSeries::Stock(bars)
    }

    /// Build an economic series, sorting points oldest first.
    pub fn economic(mut points: Vec<ChartPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        ChartSeries::Economic(points)
    }

    pub fn len(&self) -> usize {
        match self {
            ChartSeries::Stock(bars) => bars.len(),
            ChartSeries::Economic(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collapse to (date, value) points; stock bars use the close.
    pub fn points(&self) -> Vec<ChartPoint> {
        match self {
            ChartSeries::Stock(bars) => bars
                .iter()
                .map(|b| ChartPoint::new(b.date, b.close))
                .collect(),
            ChartSeries::Economic(points) => points.clone(),
        }
    }

    pub fn is_stock(&self) -> bool {
        matches!(self, ChartSeries::Stock(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("daily".parse::<Period>().unwrap(), Period::Daily);
        assert_eq!(" Weekly ".parse::<Period>().unwrap(), Period::Weekly);
        assert_eq!("1m".parse::<Period>().unwrap(), Period::Monthly);
        assert!("hourly".parse::<Period>().is_err());
        assert_eq!(Period::default(), Period::Daily);
    }

    #[test]
    fn test_stock_series_sorted_oldest_first() {
        let bar = |d: NaiveDate, close: f64| PriceBar {
            date: d,
            open: close,
            high: close,
            low: close,
            close,
            volume: 100,
        };
        let series = ChartSeries::stock(vec![
            bar(date(2024, 1, 3), 3.0),
            bar(date(2024, 1, 1), 1.0),
            bar(date(2024, 1, 2), 2.0),
        ]);

        let points = series.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value, 1.0);
        assert_eq!(points[2].value, 3.0);
        assert!(series.is_stock());
    }

    #[test]
    fn test_series_serialization_shape() {
        let series = ChartSeries::economic(vec![ChartPoint::new(date(2023, 12, 31), 2.5)]);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["kind"], "economic");
        assert_eq!(json["points"][0]["date"], "2023-12-31");
        assert_eq!(json["points"][0]["value"], 2.5);
    }
}
