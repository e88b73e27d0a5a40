//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The closed set of tools the model may request.
///
/// The wire name of each variant is what the model sees in the declared
/// function menu and what it sends back in a function call. Any name that
/// does not map to a variant is an unrecognized function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Current quote for a ticker
    StockQuote,
    /// Daily/weekly/monthly OHLCV series for a ticker
    HistoricalStockData,
    /// Article search by keyword
    FinancialNews,
    /// Macro indicator series (CPI, PPI, policy rate, GDP growth)
    EconomicIndicator,
    /// Synthetic regional announcements
    RegionalAnnouncements,
    /// Synthetic regional market sentiment
    MarketSentiment,
    /// Synthetic regional indicator series (fallback for uncovered regions)
    RegionalIndicator,
    /// Text-to-image generation
    ImageGeneration,
}

impl ToolKind {
    /// Every tool, in declaration order.
    pub const ALL: [ToolKind; 8] = [
        ToolKind::StockQuote,
        ToolKind::HistoricalStockData,
        ToolKind::FinancialNews,
        ToolKind::EconomicIndicator,
        ToolKind::RegionalAnnouncements,
        ToolKind::MarketSentiment,
        ToolKind::RegionalIndicator,
        ToolKind::ImageGeneration,
    ];

    /// Wire name declared to the model.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::StockQuote => "get_stock_price",
            ToolKind::HistoricalStockData => "get_historical_stock_data",
            ToolKind::FinancialNews => "get_financial_news",
            ToolKind::EconomicIndicator => "get_economic_indicator",
            ToolKind::RegionalAnnouncements => "get_regional_announcements",
            ToolKind::MarketSentiment => "get_market_sentiment",
            ToolKind::RegionalIndicator => "get_regional_indicator",
            ToolKind::ImageGeneration => "generate_image",
        }
    }

    /// Map a wire name back to its variant. Exact match only.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether a successful outcome of this tool carries a chart series.
    pub fn produces_chart(&self) -> bool {
        matches!(
            self,
            ToolKind::HistoricalStockData | ToolKind::EconomicIndicator | ToolKind::RegionalIndicator
        )
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Definition of a tool declared to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "get_stock_price")
    pub name: String,
    /// Natural-language description used by the model to pick a tool
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "date", "number")
    pub param_type: String,
    /// Allowed values; empty means unconstrained
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Start a definition for a known tool kind.
    pub fn for_kind(kind: ToolKind, description: impl Into<String>) -> Self {
        Self::new(kind.name(), description)
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// The tool kind this definition declares, if its name is recognized.
    pub fn kind(&self) -> Option<ToolKind> {
        ToolKind::from_name(&self.name)
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            allowed_values: Vec::new(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Check a candidate value against the allowed set (case-insensitive,
    /// surrounding whitespace ignored like every argument read).
    pub fn allows(&self, value: &str) -> bool {
        let value = value.trim();
        self.allowed_values.is_empty()
            || self
                .allowed_values
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(value))
    }
}

/// Ordered catalog of tools declared to the model.
///
/// Declaration order is preserved so the menu handed to the model is stable
/// across queries. Registering a name twice replaces the earlier definition
/// in place.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: Vec<ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All definitions in declaration order.
    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A model-issued request to run one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call, as sent by the model
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn for_kind(kind: ToolKind) -> Self {
        Self::new(kind.name())
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_arguments(mut self, arguments: HashMap<String, serde_json::Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// The tool kind named by this call, if recognized.
    pub fn kind(&self) -> Option<ToolKind> {
        ToolKind::from_name(self.tool_name.trim())
    }

    /// Whether the model supplied a usable tool name at all.
    pub fn has_name(&self) -> bool {
        !self.tool_name.trim().is_empty()
    }

    /// Get a non-blank string argument, trimmed
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_name_roundtrip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("get_weather"), None);
        assert_eq!(ToolKind::from_name(""), None);
    }

    #[test]
    fn test_chart_producing_tools() {
        assert!(ToolKind::HistoricalStockData.produces_chart());
        assert!(ToolKind::EconomicIndicator.produces_chart());
        assert!(!ToolKind::StockQuote.produces_chart());
        assert!(!ToolKind::ImageGeneration.produces_chart());
    }

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::for_kind(ToolKind::StockQuote, "Get a quote")
            .with_parameter(ToolParameter::new("ticker", "Ticker symbol", true));

        assert_eq!(tool.name, "get_stock_price");
        assert_eq!(tool.kind(), Some(ToolKind::StockQuote));
        assert!(tool.parameter("ticker").unwrap().required);
        assert!(tool.parameter("missing").is_none());
    }

    #[test]
    fn test_parameter_allowed_values() {
        let param = ToolParameter::new("period", "Sampling period", false)
            .with_allowed_values(["daily", "weekly", "monthly"]);

        assert!(param.allows("daily"));
        assert!(param.allows("WEEKLY"));
        assert!(!param.allows("hourly"));

        let free = ToolParameter::new("ticker", "Ticker", true);
        assert!(free.allows("anything"));
    }

    #[test]
    fn test_tool_spec_preserves_order() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("b_tool", "B"))
            .register(ToolDefinition::new("a_tool", "A"))
            .register(ToolDefinition::new("c_tool", "C"));

        let names: Vec<&str> = spec.names().collect();
        assert_eq!(names, vec!["b_tool", "a_tool", "c_tool"]);
        assert_eq!(spec.len(), 3);
    }

    #[test]
    fn test_tool_spec_register_replaces_in_place() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("a_tool", "first"))
            .register(ToolDefinition::new("b_tool", "B"))
            .register(ToolDefinition::new("a_tool", "second"));

        assert_eq!(spec.len(), 2);
        assert_eq!(spec.all().next().unwrap().description, "second");
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall::for_kind(ToolKind::StockQuote)
            .with_arg("ticker", " AAPL ")
            .with_arg("blank", "   ")
            .with_arg("limit", 5);

        assert_eq!(call.kind(), Some(ToolKind::StockQuote));
        assert_eq!(call.get_string("ticker"), Some("AAPL"));
        assert_eq!(call.get_string("blank"), None);
        assert!(call.require_string("blank").is_err());
        assert_eq!(call.get_string("limit"), None);
    }

    #[test]
    fn test_tool_call_without_name() {
        assert!(!ToolCall::new("").has_name());
        assert!(!ToolCall::new("   ").has_name());
        assert!(ToolCall::new("get_stock_price").has_name());
    }
}
