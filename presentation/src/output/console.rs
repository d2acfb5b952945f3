//! Console output formatter for readiness reports

use crate::output::formatter::ReportFormatter;
use blueprint_domain::util::truncate_label;
use blueprint_domain::{
    BenchmarkComparison, Lead, QuestionBank, QuestionKind, ReadinessReport, ScoreBand,
    SectionResult,
};
use colored::{Color, Colorize};

/// Width of the section bars in characters.
pub const BAR_WIDTH: usize = 20;

const LABEL_WIDTH: usize = 26;

/// Terminal colour of a score band.
pub fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Green => Color::Green,
        ScoreBand::Yellow => Color::Yellow,
        ScoreBand::Orange => Color::TrueColor {
            r: 255,
            g: 140,
            b: 0,
        },
        ScoreBand::Red => Color::Red,
    }
}

/// Horizontal bar for a percentage, with `│` at the benchmark position.
pub fn bar(percentage: u32, benchmark: Option<u32>, width: usize) -> String {
    let cells = |pct: u32| ((pct.min(100) as usize) * width + 50) / 100;
    let filled = cells(percentage);
    let marker = benchmark.map(|b| cells(b).min(width.saturating_sub(1)));
    (0..width)
        .map(|i| match (marker, i < filled) {
            (Some(m), _) if m == i => '│',
            (_, true) => '█',
            (_, false) => '░',
        })
        .collect()
}

/// Signed percentage-point difference, e.g. `+12` or `-3`.
pub fn signed_delta(comparison: &BenchmarkComparison) -> String {
    format!("{:+}", comparison.delta())
}

/// Formats readiness reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(report: &ReadinessReport, lead: Option<&Lead>) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Breakaway Blueprint Results"));
        output.push('\n');

        if let Some(lead) = lead {
            output.push_str(&format!("{} {}\n\n", "Prepared for:".cyan().bold(), lead.name()));
        }

        let color = band_color(report.band);
        output.push_str(&format!(
            "{} {}  {}\n",
            "Total Score:".cyan().bold(),
            report.score_label().color(color).bold(),
            bar(report.total_percentage, None, BAR_WIDTH * 2).color(color)
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Readiness Tier:".cyan().bold(),
            report.tier.label.bold()
        ));
        output.push_str(&format!("{}\n", report.tier.heading.bold()));
        output.push_str(&format!("{}\n", report.tier.description));

        output.push_str(&Self::section_header("Readiness Dimensions"));
        output.push_str(&format!(
            "{}\n",
            format!("  {:<LABEL_WIDTH$} {:<BAR_WIDTH$} {:>4}  {}", "", "", "you", "benchmark").dimmed()
        ));
        for (section, comparison) in report.sections.iter().zip(&report.comparisons) {
            output.push_str(&Self::section_line(section, comparison));
            output.push('\n');
        }

        output.push_str(&Self::section_header("Priority Roadmap"));
        for (i, section) in report.weakest.iter().enumerate() {
            let band = ScoreBand::from_percentage(section.percentage);
            output.push_str(&format!(
                "\n{} {} {}\n",
                format!("{}.", i + 1).bold(),
                format!("[{}]", band.priority_label()).color(band_color(band)).bold(),
                format!("{} ({}%)", section.label, section.percentage).bold()
            ));
            output.push_str(&Self::indent(&section.recommendation, "   "));
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{} {} ({}%)\n",
            "Primary gap:".yellow().bold(),
            report.primary_gap.label,
            report.primary_gap.percentage
        ));

        output.push_str(&format!(
            "\n{} {} {}\n",
            "Next step:".green().bold(),
            report.tier.cta.label,
            report.tier.cta.url.underline()
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &ReadinessReport, lead: Option<&Lead>) -> String {
        let value = serde_json::json!({
            "report": report,
            "lead": lead,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format score, tier and section percentages only
    pub fn format_summary(report: &ReadinessReport) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {} ({})\n\n",
            "Breakaway Blueprint:".cyan().bold(),
            report.score_label().color(band_color(report.band)).bold(),
            report.tier.label
        ));
        for section in &report.sections {
            output.push_str(&format!(
                "  {:<LABEL_WIDTH$} {}\n",
                section.label,
                format!("{:>3}%", section.percentage)
                    .color(band_color(ScoreBand::from_percentage(section.percentage)))
            ));
        }
        output.push_str(&format!(
            "\n{} {} ({}%)\n",
            "Primary gap:".yellow().bold(),
            report.primary_gap.label,
            report.primary_gap.percentage
        ));
        output
    }

    /// List every section and question of a bank.
    pub fn format_bank(bank: &QuestionBank) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Question Bank"));
        output.push('\n');
        output.push_str(&format!(
            "{} sections, {} questions, {} points\n",
            bank.sections().len(),
            bank.len(),
            bank.total_max_score()
        ));

        for section in bank.sections() {
            output.push_str(&Self::section_header(&format!(
                "{} ({} pts, benchmark {}%)",
                section.label,
                section.max_score,
                bank.benchmark(&section.id)
            )));
            for id in &section.question_ids {
                let Some(question) = bank.question(id) else {
                    continue;
                };
                output.push_str(&format!("\n{} {}\n", format!("[{}]", question.id).dimmed(), question.text));
                match &question.kind {
                    QuestionKind::Choice { options } => {
                        for option in options {
                            output.push_str(&format!("    - {} ({})\n", option.label, option.score));
                        }
                    }
                    QuestionKind::Scale {
                        min,
                        max,
                        multiplier,
                        ..
                    } => {
                        output.push_str(&format!("    scale {}..{} x {}\n", min, max, multiplier));
                    }
                }
            }
        }
        output.push_str(&Self::footer());
        output
    }

    fn section_line(section: &SectionResult, comparison: &BenchmarkComparison) -> String {
        let color = band_color(ScoreBand::from_percentage(section.percentage));
        let delta = signed_delta(comparison);
        let delta = if comparison.delta() >= 0 {
            delta.green()
        } else {
            delta.red()
        };
        format!(
            "  {:<LABEL_WIDTH$} {} {:>3}%  {:>3}% ({})",
            truncate_label(&section.label, LABEL_WIDTH),
            bar(section.percentage, Some(comparison.benchmark), BAR_WIDTH).color(color),
            section.percentage,
            comparison.benchmark,
            delta
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ReportFormatter for ConsoleFormatter {
    fn format(&self, report: &ReadinessReport, lead: Option<&Lead>) -> String {
        Self::format(report, lead)
    }

    fn format_json(&self, report: &ReadinessReport, lead: Option<&Lead>) -> String {
        Self::format_json(report, lead)
    }

    fn format_summary(&self, report: &ReadinessReport) -> String {
        Self::format_summary(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_domain::{AnswerSet, DEFAULT_WEAKEST_COUNT, ReportFormat};

    fn report() -> ReadinessReport {
        let bank = QuestionBank::standard().unwrap();
        let answers: AnswerSet = bank
            .questions()
            .iter()
            .map(|q| (q.id.clone(), q.max_score() / 2))
            .collect();
        ReadinessReport::evaluate(&bank, &answers, DEFAULT_WEAKEST_COUNT)
    }

    #[test]
    fn test_bar_fill_and_marker() {
        assert_eq!(bar(0, None, 10), "░░░░░░░░░░");
        assert_eq!(bar(100, None, 10), "██████████");
        assert_eq!(bar(50, None, 10), "█████░░░░░");
        assert_eq!(bar(50, Some(20), 10), "██│██░░░░░");
        assert_eq!(bar(100, Some(100), 4), "███│");
        assert_eq!(bar(45, None, 10).chars().count(), 10);
    }

    #[test]
    fn test_full_report_mentions_everything() {
        colored::control::set_override(false);
        let report = report();
        let text = ConsoleFormatter::format(&report, None);
        assert!(text.contains(&report.score_label()));
        assert!(text.contains(report.tier.label));
        assert!(text.contains("Priority Roadmap"));
        assert!(text.contains(report.tier.cta.url));
        for section in &report.sections {
            assert!(text.contains(&truncate_label(&section.label, LABEL_WIDTH)));
        }
    }

    #[test]
    fn test_summary_lists_sections_in_order() {
        colored::control::set_override(false);
        let report = report();
        let text = ConsoleFormatter::format_summary(&report);
        let positions: Vec<usize> = report
            .sections
            .iter()
            .map(|s| text.find(&s.label).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_json_is_parseable() {
        let report = report();
        let json = ConsoleFormatter.render(ReportFormat::Json, &report, None);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["report"]["total_percentage"],
            u64::from(report.total_percentage)
        );
        assert!(value["lead"].is_null());
        assert_eq!(value["report"]["sections"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn test_bank_listing() {
        colored::control::set_override(false);
        let bank = QuestionBank::standard().unwrap();
        let text = ConsoleFormatter::format_bank(&bank);
        assert!(text.contains("9 sections, 19 questions, 95 points"));
        assert!(text.contains("[aum]"));
    }
}
