//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; every section has defaults so a partial
//! file (or no file) yields a working configuration.

mod providers;
mod server;

pub use providers::{
    FileModelConfig, FileOpenAiConfig, FileProviderConfig, FileProvidersConfig, env_lookup,
    resolve_credential,
};
pub use server::{
    FileCacheConfig, FileHttpConfig, FileLoggingConfig, FilePipelineConfig, FileServerConfig,
};

use serde::{Deserialize, Serialize};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field (e.g. "cache.ttl_secs")
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP server settings
    pub server: FileServerConfig,
    /// Function-calling model
    pub model: FileModelConfig,
    /// External data providers
    pub providers: FileProvidersConfig,
    /// Query pipeline behavior
    pub pipeline: FilePipelineConfig,
    /// Indicator cache
    pub cache: FileCacheConfig,
    /// Log outputs
    pub logging: FileLoggingConfig,
    /// Outbound HTTP client
    pub http: FileHttpConfig,
}

impl FileConfig {
    /// Validate against the process environment.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with(env_lookup)
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// `lookup` resolves environment variables. It checks:
    /// 1. Model credential and name
    /// 2. Provider credentials (each missing one disables a tool)
    /// 3. Numeric settings that silently change behavior when zero
    pub fn validate_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Model
        if self.model.name.trim().is_empty() {
            issues.push(ConfigIssue::error("model.name", "model name cannot be empty"));
        }
        if resolve_credential(self.model.api_key.as_deref(), &self.model.api_key_env, &lookup)
            .is_none()
        {
            issues.push(ConfigIssue::warning(
                "model.api_key_env",
                format!(
                    "{} is not set; queries will fail until a model key is configured",
                    self.model.api_key_env
                ),
            ));
        }

        // 2. Providers
        for (section, env, direct) in self.providers.credential_sources() {
            if resolve_credential(direct, env, &lookup).is_none() {
                issues.push(ConfigIssue::warning(
                    format!("{}.api_key_env", section),
                    format!("{} is not set; tools backed by [{}] will return errors", env, section),
                ));
            }
        }

        // 3. Numeric settings
        if !self.cache.is_enabled() {
            issues.push(ConfigIssue::warning(
                "cache.ttl_secs",
                "indicator cache is disabled (ttl_secs or capacity is 0)",
            ));
        }
        if self.pipeline.history_points == 0 {
            issues.push(ConfigIssue::warning(
                "pipeline.history_points",
                "history_points is 0; using 1",
            ));
        }
        if self.pipeline.news_page_size == 0 {
            issues.push(ConfigIssue::warning(
                "pipeline.news_page_size",
                "news_page_size is 0; using 1",
            ));
        }
        if self.pipeline.default_country.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "pipeline.default_country",
                "default_country cannot be empty",
            ));
        }
        if self.http.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "http.timeout_secs",
                "outbound requests have no timeout",
            ));
        }

        issues
    }
}
