//! Configuration file loading for finquery
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `FINQUERY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./finquery.toml` or `./.finquery.toml`
//! 4. Global: `$XDG_CONFIG_HOME/finquery/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileCacheConfig, FileConfig, FileHttpConfig, FileLoggingConfig, FileModelConfig,
    FileOpenAiConfig, FilePipelineConfig, FileProviderConfig, FileProvidersConfig,
    FileServerConfig, Severity, env_lookup, resolve_credential,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
