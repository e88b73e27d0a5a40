//! Symbol alias table: index names to tradable proxy instruments.
//!
//! Market indices have no directly tradable symbol on the price provider, so
//! lookups for an index are redirected to an ETF that tracks it.

/// (alias, proxy ticker). Aliases are compared after trimming and uppercasing.
const INDEX_PROXIES: &[(&str, &str)] = &[
    ("S&P 500", "SPY"),
    ("S&P500", "SPY"),
    ("SP500", "SPY"),
    ("SPX", "SPY"),
    ("^GSPC", "SPY"),
    ("NASDAQ", "QQQ"),
    ("NASDAQ 100", "QQQ"),
    ("NASDAQ100", "QQQ"),
    ("^NDX", "QQQ"),
    ("^IXIC", "QQQ"),
    ("DOW", "DIA"),
    ("DOW JONES", "DIA"),
    ("DJIA", "DIA"),
    ("^DJI", "DIA"),
    ("RUSSELL 2000", "IWM"),
    ("RUSSELL2000", "IWM"),
    ("^RUT", "IWM"),
];

/// A ticker after alias resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSymbol {
    /// What the caller asked for (trimmed)
    pub requested: String,
    /// What the provider should be queried with
    pub ticker: String,
}

impl ResolvedSymbol {
    /// Whether the requested name was substituted by a proxy instrument.
    pub fn is_proxy(&self) -> bool {
        !self.requested.eq_ignore_ascii_case(&self.ticker)
    }
}

/// Proxy ticker for a named index, if the input is a known alias.
pub fn proxy_ticker(input: &str) -> Option<&'static str> {
    let normalized = input.trim().to_uppercase();
    INDEX_PROXIES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, proxy)| *proxy)
}

/// Resolve user/model input to the ticker actually sent to the provider.
pub fn resolve_symbol(input: &str) -> ResolvedSymbol {
    let requested = input.trim().to_string();
    let ticker = proxy_ticker(&requested)
        .map(str::to_string)
        .unwrap_or_else(|| requested.to_uppercase());
    ResolvedSymbol { requested, ticker }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_aliases_map_to_proxies() {
        assert_eq!(resolve_symbol("S&P 500").ticker, "SPY");
        assert_eq!(resolve_symbol("sp500").ticker, "SPY");
        assert_eq!(resolve_symbol("  nasdaq ").ticker, "QQQ");
        assert_eq!(resolve_symbol("Dow Jones").ticker, "DIA");
        assert_eq!(resolve_symbol("^RUT").ticker, "IWM");
        assert!(resolve_symbol("S&P 500").is_proxy());
    }

    #[test]
    fn test_plain_tickers_pass_through_uppercased() {
        let resolved = resolve_symbol("aapl");
        assert_eq!(resolved.ticker, "AAPL");
        assert_eq!(resolved.requested, "aapl");
        assert!(!resolved.is_proxy());
    }

    #[test]
    fn test_proxy_ticker_unknown() {
        assert_eq!(proxy_ticker("MSFT"), None);
    }
}
