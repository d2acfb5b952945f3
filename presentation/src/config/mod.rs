//! Presentation-level configuration
//!
//! Configuration for report output and the interactive session.

use blueprint_domain::ReportFormat;
use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: ReportFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Lines per page of the exported report
    pub export_page_lines: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Full,
            color: true,
            export_page_lines: 60,
        }
    }
}

/// Interactive session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveConfig {
    /// Show the progress bar while answering
    pub show_progress: bool,
    /// Path to the line-editor history file
    pub history_file: Option<String>,
}

impl Default for InteractiveConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}
