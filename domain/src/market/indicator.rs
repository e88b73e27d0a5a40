//! Macro-indicator codes and lookup queries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Supported macro-indicator codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorCode {
    /// Consumer price index
    Cpi,
    /// Producer price index
    Ppi,
    /// Policy interest rate
    InterestRate,
    /// GDP growth
    Gdp,
}

impl IndicatorCode {
    pub const ALL: [IndicatorCode; 4] = [
        IndicatorCode::Cpi,
        IndicatorCode::Ppi,
        IndicatorCode::InterestRate,
        IndicatorCode::Gdp,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            IndicatorCode::Cpi => "CPI",
            IndicatorCode::Ppi => "PPI",
            IndicatorCode::InterestRate => "INTEREST_RATE",
            IndicatorCode::Gdp => "GDP",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IndicatorCode::Cpi => "Consumer Price Index",
            IndicatorCode::Ppi => "Producer Price Index",
            IndicatorCode::InterestRate => "Policy Interest Rate",
            IndicatorCode::Gdp => "GDP Growth Rate",
        }
    }

    /// Comma-separated list of accepted codes, for error messages.
    pub fn supported_codes() -> String {
        Self::ALL
            .iter()
            .map(|c| c.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for IndicatorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for IndicatorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "CPI" => Ok(IndicatorCode::Cpi),
            "PPI" => Ok(IndicatorCode::Ppi),
            "INTEREST_RATE" | "RATE" | "POLICY_RATE" => Ok(IndicatorCode::InterestRate),
            "GDP" | "GDP_GROWTH" => Ok(IndicatorCode::Gdp),
            _ => Err(format!(
                "Unsupported indicator code '{}'. Supported codes: {}",
                s.trim(),
                Self::supported_codes()
            )),
        }
    }
}

/// One macro-indicator lookup; doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorQuery {
    pub code: IndicatorCode,
    /// ISO country code, uppercased
    pub country: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl IndicatorQuery {
    pub fn new(code: IndicatorCode, country: impl AsRef<str>) -> Self {
        Self {
            code,
            country: country.as_ref().trim().to_uppercase(),
            start: None,
            end: None,
        }
    }

    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Reject ranges whose start falls after their end.
    pub fn validate_range(&self) -> Result<(), String> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(format!(
                "start_date {} is after end_date {}",
                start, end
            )),
            _ => Ok(()),
        }
    }
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", value.trim()))
}
