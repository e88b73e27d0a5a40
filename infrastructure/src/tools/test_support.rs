//! Fake providers shared by the tool tests.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use finquery_application::ports::data_providers::{
    ImageProvider, IndicatorProvider, MarketDataProvider, NewsProvider, ProviderError,
};
use finquery_domain::{Article, ChartPoint, IndicatorQuery, Period, PriceBar, StockQuote};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Market data fake: fixed bars newest first, like the real provider.
#[derive(Default)]
pub struct FakeMarket {
    bars: Vec<PriceBar>,
    error: Option<ProviderError>,
    requested: Mutex<Vec<String>>,
    periods: Mutex<Vec<Period>>,
}

impl FakeMarket {
    pub fn with_bars(count: usize) -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..count)
            .rev()
            .map(|i| {
                let close = 100.0 + i as f64;
                PriceBar {
                    date: start + Duration::days(i as i64),
                    open: close - 1.0,
                    high: close + 2.0,
                    low: close - 2.0,
                    close,
                    volume: 1_000 + i as u64,
                }
            })
            .collect();
        Self {
            bars,
            ..Default::default()
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn periods(&self) -> Vec<Period> {
        self.periods.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataProvider for FakeMarket {
    async fn quote(&self, ticker: &str) -> Result<StockQuote, ProviderError> {
        self.requested.lock().unwrap().push(ticker.to_string());
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        Ok(StockQuote {
            symbol: ticker.to_string(),
            price: 170.5,
            open: 169.0,
            high: 171.0,
            low: 168.5,
            volume: 52_000_000,
            previous_close: 168.0,
            change: 2.5,
            change_percent: 1.4881,
            latest_trading_day: NaiveDate::from_ymd_opt(2024, 5, 17),
        })
    }

    async fn history(&self, ticker: &str, period: Period) -> Result<Vec<PriceBar>, ProviderError> {
        self.requested.lock().unwrap().push(ticker.to_string());
        self.periods.lock().unwrap().push(period);
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(self.bars.clone()),
        }
    }
}

/// News fake returning `count` generated articles
pub struct FakeNews {
    pub count: usize,
    pub error: Option<ProviderError>,
    pub limits: Mutex<Vec<usize>>,
}

impl FakeNews {
    pub fn returning(count: usize) -> Self {
        Self {
            count,
            error: None,
            limits: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NewsProvider for FakeNews {
    async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<Article>, ProviderError> {
        self.limits.lock().unwrap().push(limit);
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        Ok((0..self.count.min(limit))
            .map(|i| Article {
                title: format!("{} headline {}", keyword, i),
                description: Some("Summary".to_string()),
                url: format!("https://news.example.com/{}", i),
                source: Some("Example Wire".to_string()),
                published_at: Some("2024-05-17T08:00:00Z".to_string()),
            })
            .collect())
    }
}

/// Indicator fake counting provider calls
#[derive(Default)]
pub struct FakeIndicators {
    pub calls: AtomicUsize,
    pub error: Option<ProviderError>,
}

impl FakeIndicators {
    pub fn failing(error: ProviderError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IndicatorProvider for FakeIndicators {
    async fn series(&self, _query: &IndicatorQuery) -> Result<Vec<ChartPoint>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        Ok(vec![
            ChartPoint::new(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(), 0.1),
            ChartPoint::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(), -0.8),
            ChartPoint::new(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), 0.7),
        ])
    }
}

/// Image fake returning a tiny data URL
#[derive(Default)]
pub struct FakeImages {
    pub error: Option<ProviderError>,
}

#[async_trait]
impl ImageProvider for FakeImages {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok("data:image/png;base64,iVBORw0KGgo=".to_string()),
        }
    }
}
