//! Configuration file loading for breakaway-blueprint
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `BLUEPRINT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./blueprint.toml` or `./.blueprint.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/breakaway-blueprint/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_FROM, FileBankConfig, FileConfig, FileFlowConfig,
    FileLoggingConfig, FileNotificationConfig, FileReportConfig, NotificationProvider,
    RESEND_ENDPOINT,
};
pub use loader::{ConfigLoader, ConfigSource, ENV_PREFIX};
