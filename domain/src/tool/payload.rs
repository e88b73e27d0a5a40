//! Well-known keys inside tool success payloads.
//!
//! Executors write these keys and the response aggregator reads them, so the
//! two sides never disagree on where an artifact lives.

/// `generate_image`: the generated image as a `data:` URL
pub const IMAGE_URL: &str = "image_url";

/// `get_financial_news`: array of article objects
pub const ARTICLES: &str = "articles";

/// Time-series tools: array of points or bars, oldest first
pub const SERIES: &str = "series";

/// OCR extraction: the recognized text
pub const TEXT: &str = "text";
