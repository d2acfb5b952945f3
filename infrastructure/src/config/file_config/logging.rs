//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// ```toml
/// [logging]
/// dir = "~/.local/state/breakaway-blueprint/logs"
/// dead_letter_file = "undelivered.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the daily-rolling log file; console only when unset
    pub dir: Option<PathBuf>,
    /// JSONL file for undelivered notifications; relative paths resolve
    /// against `dir`
    pub dead_letter_file: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Full path of the dead-letter file, if one is configured.
    pub fn dead_letter_path(&self) -> Option<PathBuf> {
        let file = self.dead_letter_file.as_ref()?;
        match &self.dir {
            Some(dir) if file.is_relative() => Some(dir.join(file)),
            _ => Some(file.clone()),
        }
    }
}
