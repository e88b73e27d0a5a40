//! Provider configuration from TOML (`[model]` and `[providers]` sections)

use serde::{Deserialize, Serialize};

/// Resolve a credential: a non-blank direct key wins, then the environment
/// variable named by `api_key_env`.
pub fn resolve_credential(
    api_key: Option<&str>,
    api_key_env: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    api_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| {
            lookup(api_key_env)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
}

/// Read an environment variable.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Gemini model configuration (`[model]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model identifier (default: "gemini-2.0-flash").
    pub name: String,
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// Sampling temperature; provider default when unset.
    pub temperature: Option<f32>,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.0-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: None,
        }
    }
}

impl FileModelConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_credential(self.api_key.as_deref(), &self.api_key_env, env_lookup)
    }
}

/// Credentials and endpoint for one data provider.
///
/// Defaults differ per provider, so a partial section is completed by the
/// figment defaults layer in [`ConfigLoader`](crate::config::ConfigLoader).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileProviderConfig {
    /// Environment variable name for the API key.
    pub api_key_env: String,
    /// Direct API key (not recommended; use env var instead).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the provider API.
    pub base_url: String,
}

impl FileProviderConfig {
    fn new(api_key_env: &str, base_url: &str) -> Self {
        Self {
            api_key_env: api_key_env.to_string(),
            api_key: None,
            base_url: base_url.to_string(),
        }
    }

    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_credential(self.api_key.as_deref(), &self.api_key_env, env_lookup)
    }
}

/// OpenAI configuration: image generation and speech synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use env var instead).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API.
    pub base_url: String,
    /// Image model (default: "dall-e-3").
    pub image_model: String,
    /// Image size (default: "1024x1024").
    pub image_size: String,
    /// Speech model (default: "tts-1").
    pub speech_model: String,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            image_model: "dall-e-3".to_string(),
            image_size: "1024x1024".to_string(),
            speech_model: "tts-1".to_string(),
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_credential(self.api_key.as_deref(), &self.api_key_env, env_lookup)
    }
}

/// All external data providers (`[providers.*]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Quotes and price history.
    pub alpha_vantage: FileProviderConfig,
    /// Article search.
    pub news_api: FileProviderConfig,
    /// Macro indicators.
    pub trading_economics: FileProviderConfig,
    /// Image and speech generation.
    pub openai: FileOpenAiConfig,
    /// OCR for uploaded images.
    pub ocr_space: FileProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            alpha_vantage: FileProviderConfig::new(
                "ALPHA_VANTAGE_API_KEY",
                "https://www.alphavantage.co",
            ),
            news_api: FileProviderConfig::new("NEWS_API_KEY", "https://newsapi.org"),
            trading_economics: FileProviderConfig::new(
                "TRADING_ECONOMICS_API_KEY",
                "https://api.tradingeconomics.com",
            ),
            openai: FileOpenAiConfig::default(),
            ocr_space: FileProviderConfig::new("OCR_SPACE_API_KEY", "https://api.ocr.space"),
        }
    }
}

impl FileProvidersConfig {
    /// `(section, api_key_env, direct key)` for every provider, in declaration order.
    pub fn credential_sources(&self) -> Vec<(&'static str, &str, Option<&str>)> {
        vec![
            (
                "providers.alpha_vantage",
                self.alpha_vantage.api_key_env.as_str(),
                self.alpha_vantage.api_key.as_deref(),
            ),
            (
                "providers.news_api",
                self.news_api.api_key_env.as_str(),
                self.news_api.api_key.as_deref(),
            ),
            (
                "providers.trading_economics",
                self.trading_economics.api_key_env.as_str(),
                self.trading_economics.api_key.as_deref(),
            ),
            (
                "providers.openai",
                self.openai.api_key_env.as_str(),
                self.openai.api_key.as_deref(),
            ),
            (
                "providers.ocr_space",
                self.ocr_space.api_key_env.as_str(),
                self.ocr_space.api_key.as_deref(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_direct_key_wins() {
        let key = resolve_credential(Some(" direct "), "X", |_| Some("from-env".to_string()));
        assert_eq!(key.as_deref(), Some("direct"));
    }

    #[test]
    fn test_falls_back_to_env() {
        let key = resolve_credential(None, "NEWS_API_KEY", |name| {
            (name == "NEWS_API_KEY").then(|| "abc".to_string())
        });
        assert_eq!(key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_blank_values_are_missing() {
        assert!(resolve_credential(Some("  "), "X", no_env).is_none());
        assert!(resolve_credential(None, "X", |_| Some("   ".to_string())).is_none());
    }

    #[test]
    fn test_default_endpoints() {
        let providers = FileProvidersConfig::default();
        assert_eq!(providers.alpha_vantage.base_url, "https://www.alphavantage.co");
        assert_eq!(providers.news_api.api_key_env, "NEWS_API_KEY");
        assert_eq!(providers.credential_sources().len(), 5);
    }
}
