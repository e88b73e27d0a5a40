//! Server, pipeline, cache, logging and HTTP client sections

use finquery_application::PipelineParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP server settings (`[server]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Bind address (default: "127.0.0.1").
    pub host: String,
    /// Bind port (default: 3001).
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            cors_origins: Vec::new(),
        }
    }
}

impl FileServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Query pipeline settings (`[pipeline]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Speak the final summary (default: true).
    pub audio_enabled: bool,
    /// Speech voice (default: "alloy").
    pub voice: String,
    /// Most recent bars kept from a historical series (default: 100).
    pub history_points: usize,
    /// Articles per news lookup (default: 5).
    pub news_page_size: usize,
    /// Country for indicator lookups that name none (default: "CN").
    pub default_country: String,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        let params = PipelineParams::default();
        Self {
            audio_enabled: params.audio_enabled,
            voice: "alloy".to_string(),
            history_points: params.history_points,
            news_page_size: params.news_page_size,
            default_country: params.default_country,
        }
    }
}

impl FilePipelineConfig {
    pub fn to_params(&self) -> PipelineParams {
        PipelineParams::default()
            .with_audio_enabled(self.audio_enabled)
            .with_history_points(self.history_points)
            .with_news_page_size(self.news_page_size)
            .with_default_country(&self.default_country)
    }
}

/// Indicator cache settings (`[cache]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Entry time-to-live in seconds (default: 3600). 0 disables caching.
    pub ttl_secs: u64,
    /// Maximum number of cached lookups (default: 1000).
    pub capacity: u64,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            capacity: 1000,
        }
    }
}

impl FileCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn is_enabled(&self) -> bool {
        self.ttl_secs > 0 && self.capacity > 0
    }
}

/// Log outputs (`[logging]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rolling diagnostic logs; stderr only when unset.
    pub dir: Option<String>,
    /// Path of the JSONL query transcript; disabled when unset.
    pub query_log: Option<String>,
}

/// Outbound HTTP client settings (`[http]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// Per-request timeout in seconds (default: 30). 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl FileHttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
