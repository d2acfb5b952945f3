//! Report configuration from TOML (`[report]` section)

use blueprint_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_WEAKEST_COUNT, ReportFormat};
use serde::{Deserialize, Serialize};

/// Raw report configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReportConfig {
    /// Report format (uses domain type)
    pub format: Option<ReportFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Sections on the priority roadmap
    pub weakest_count: usize,
    /// Lines per page of the exported report
    pub export_page_lines: usize,
}

impl Default for FileReportConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            weakest_count: DEFAULT_WEAKEST_COUNT,
            export_page_lines: 60,
        }
    }
}

impl FileReportConfig {
    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.weakest_count == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "report.weakest_count".to_string(),
                    value: "0".to_string(),
                },
                "report.weakest_count is 0, the priority roadmap will be empty",
            ));
        }
        if self.export_page_lines < 10 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "report.export_page_lines".to_string(),
                    value: self.export_page_lines.to_string(),
                },
                "report.export_page_lines must be at least 10",
            ));
        }
        issues
    }
}
