//! Report format value object

use serde::{Deserialize, Serialize};

/// How a readiness report is rendered.
///
/// This is a domain concept shared by the configuration file and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Score, charts, gaps and roadmap (default)
    #[default]
    Full,
    /// Score, tier and per-section percentages
    Summary,
    /// Machine-readable JSON
    Json,
}
