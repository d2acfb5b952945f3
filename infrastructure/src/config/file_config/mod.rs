//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod bank;
mod flow;
mod logging;
mod notification;
mod report;

pub use bank::FileBankConfig;
pub use flow::FileFlowConfig;
pub use logging::FileLoggingConfig;
pub use notification::{
    DEFAULT_FROM, FileNotificationConfig, NotificationProvider, RESEND_ENDPOINT,
};
pub use report::FileReportConfig;

use blueprint_application::FlowParams;
use blueprint_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The configuration has at least one error-severity issue.
#[derive(Debug, Error)]
#[error("invalid configuration: {}", summary(.issues))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

fn summary(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Lead notification delivery
    pub notification: FileNotificationConfig,
    /// Question bank source
    pub bank: FileBankConfig,
    /// Report rendering
    pub report: FileReportConfig,
    /// Screen flow
    pub flow: FileFlowConfig,
    /// Log files
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.notification.issues());
        issues.extend(self.report.issues());
        issues
    }

    /// Split issues into warnings (returned) and errors (fail the call).
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError { issues: errors })
        }
    }

    /// Application flow parameters.
    pub fn flow_params(&self) -> FlowParams {
        FlowParams::default()
            .with_require_gate(self.flow.require_gate)
            .with_weakest_count(self.report.weakest_count)
    }
}
