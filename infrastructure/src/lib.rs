//! Infrastructure layer for breakaway-blueprint
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, the question bank loader and configuration
//! file loading.

pub mod bank;
pub mod config;
pub mod logging;
pub mod notify;

// Re-export commonly used types
pub use bank::{BankLoadError, load_bank, load_configured_bank};
pub use config::{
    ConfigLoader, ConfigSource, ConfigValidationError, ENV_PREFIX, FileBankConfig, FileConfig,
    FileFlowConfig, FileLoggingConfig, FileNotificationConfig, FileReportConfig,
    NotificationProvider,
};
pub use logging::JsonlDeadLetterLog;
pub use notify::{ResendNotifier, WebhookNotifier, build_notifier};
