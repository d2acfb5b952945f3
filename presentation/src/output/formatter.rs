//! Output formatter trait

use blueprint_domain::{Lead, ReadinessReport, ReportFormat};

/// Trait for formatting readiness reports
pub trait ReportFormatter {
    /// Format the complete report
    fn format(&self, report: &ReadinessReport, lead: Option<&Lead>) -> String;

    /// Format as JSON
    fn format_json(&self, report: &ReadinessReport, lead: Option<&Lead>) -> String;

    /// Format score, tier and section percentages only
    fn format_summary(&self, report: &ReadinessReport) -> String;

    /// Dispatch on a configured format.
    fn render(&self, format: ReportFormat, report: &ReadinessReport, lead: Option<&Lead>) -> String {
        match format {
            ReportFormat::Full => self.format(report, lead),
            ReportFormat::Summary => self.format_summary(report),
            ReportFormat::Json => self.format_json(report, lead),
        }
    }
}
