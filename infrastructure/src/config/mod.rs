//! Configuration file loading for scholar-agent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SCHOLAR_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./scholar.toml` or `./.scholar.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/scholar-agent/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileConfig, FileLoggingConfig, FilePermissionsConfig,
    FileToolsConfig,
};
pub use loader::ConfigLoader;
