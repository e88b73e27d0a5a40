//! Log-friendly descriptions of tool calls.

use finquery_domain::tool::entities::{ToolCall, ToolKind};
use finquery_domain::util::preview;

const PROMPT_PREVIEW_CHARS: usize = 40;

/// One-line description of what a call asks for, e.g. `AAPL weekly` or
/// `CPI US 2023-01-01..`.
///
/// Only the arguments that identify the request are shown; image prompts
/// are shortened.
pub(crate) fn describe_call(kind: ToolKind, call: &ToolCall) -> String {
    let arg = |key: &str| call.get_string(key).unwrap_or_default().to_string();

    match kind {
        ToolKind::StockQuote => arg("ticker"),
        ToolKind::HistoricalStockData => {
            let period = call.get_string("period").unwrap_or("daily");
            format!("{} {}", arg("ticker"), period)
        }
        ToolKind::FinancialNews => format!("\"{}\"", arg("keyword")),
        ToolKind::EconomicIndicator => {
            let mut out = arg("indicator_code");
            if let Some(country) = call.get_string("country_code") {
                out.push(' ');
                out.push_str(country);
            }
            let start = call.get_string("start_date");
            let end = call.get_string("end_date");
            if start.is_some() || end.is_some() {
                out.push_str(&format!(
                    " {}..{}",
                    start.unwrap_or_default(),
                    end.unwrap_or_default()
                ));
            }
            out
        }
        ToolKind::RegionalAnnouncements | ToolKind::MarketSentiment => arg("region"),
        ToolKind::RegionalIndicator => format!("{} {}", arg("region"), arg("indicator_code")),
        ToolKind::ImageGeneration => {
            preview(call.get_string("prompt").unwrap_or_default(), PROMPT_PREVIEW_CHARS).into_owned()
        }
    }
}
