//! Configuration file loading for campus-concierge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `CONCIERGE_<SECTION>__<KEY>` (e.g. `CONCIERGE_ROUTER__DEFAULT_DOMAIN`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./concierge.toml` or `./.concierge.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/campus-concierge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileConfig, FileHandlerConfig, FileModelsConfig,
    FileOpenAiConfig, FileOutputConfig, FileProvidersConfig, FileReplConfig, FileRouterConfig,
    FileSessionsConfig, FileToolConfig, Severity,
};
pub use loader::{ConfigError, ConfigLoader};
