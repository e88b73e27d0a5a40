//! Market domain module
//!
//! Value objects shared by the data tools: quotes, articles, historical bars,
//! macro-indicator codes, and the index → proxy ticker alias table.

pub mod entities;
pub mod indicator;
pub mod series;
pub mod symbol;

pub use entities::{Announcement, Article, SentimentLabel, SentimentReading, StockQuote};
pub use indicator::{IndicatorCode, IndicatorQuery, parse_date};
pub use series::{ChartPoint, ChartSeries, Period, PriceBar};
pub use symbol::{ResolvedSymbol, proxy_ticker, resolve_symbol};
