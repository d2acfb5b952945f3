//! Paginated plain-text export of a readiness report.
//!
//! Every page has the same height: body lines padded to the page, a blank
//! line, then a centred `Page i of n` footer. Pages are separated by a form
//! feed so printers and pagers break them correctly.

use crate::output::console::{BAR_WIDTH, bar, signed_delta};
use blueprint_domain::util::truncate_label;
use blueprint_domain::{Lead, ReadinessReport, ScoreBand};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Text width of the exported document.
pub const PAGE_WIDTH: usize = 72;

/// Smallest usable page: body, blank line and footer.
pub const MIN_PAGE_LINES: usize = 10;

const FORM_FEED: char = '\u{000C}';
const LABEL_WIDTH: usize = 26;

/// Errors writing an export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Page height {0} is below the minimum of {MIN_PAGE_LINES} lines")]
    PageTooShort(usize),

    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Greedy word wrap.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Plain report body, one entry per line.
pub fn report_lines(report: &ReadinessReport, lead: Option<&Lead>) -> Vec<String> {
    let mut lines = vec![
        "BREAKAWAY BLUEPRINT™ READINESS REPORT".to_string(),
        "=".repeat(PAGE_WIDTH),
    ];
    if let Some(lead) = lead {
        let prepared = match lead.firm() {
            Some(firm) => format!("Prepared for: {} ({})", lead.name(), firm),
            None => format!("Prepared for: {}", lead.name()),
        };
        lines.push(prepared);
    }
    lines.push(String::new());

    lines.push(format!(
        "Total score: {}  {}",
        report.score_label(),
        bar(report.total_percentage, None, BAR_WIDTH * 2)
    ));
    lines.push(format!("Readiness tier: {}", report.tier.label));
    lines.push(String::new());
    lines.extend(wrap(report.tier.heading, PAGE_WIDTH));
    lines.extend(wrap(report.tier.description, PAGE_WIDTH));
    lines.push(String::new());

    lines.push("READINESS DIMENSIONS".to_string());
    lines.push("-".repeat(PAGE_WIDTH));
    for (section, comparison) in report.sections.iter().zip(&report.comparisons) {
        lines.push(format!(
            "{:<LABEL_WIDTH$} {} {:>3}%  benchmark {:>3}% ({})",
            truncate_label(&section.label, LABEL_WIDTH),
            bar(section.percentage, Some(comparison.benchmark), BAR_WIDTH),
            section.percentage,
            comparison.benchmark,
            signed_delta(comparison)
        ));
    }
    lines.push(String::new());

    lines.push("PRIORITY ROADMAP".to_string());
    lines.push("-".repeat(PAGE_WIDTH));
    for (i, section) in report.weakest.iter().enumerate() {
        let band = ScoreBand::from_percentage(section.percentage);
        lines.push(format!(
            "{}. [{}] {} ({}%)",
            i + 1,
            band.priority_label(),
            section.label,
            section.percentage
        ));
        lines.extend(
            wrap(&section.recommendation, PAGE_WIDTH - 3)
                .into_iter()
                .map(|l| format!("   {}", l)),
        );
        lines.push(String::new());
    }

    lines.push(format!(
        "Primary gap: {} ({}%)",
        report.primary_gap.label, report.primary_gap.percentage
    ));
    lines.push(String::new());
    lines.push("NEXT STEP".to_string());
    lines.push("-".repeat(PAGE_WIDTH));
    lines.push(format!("{}: {}", report.tier.cta.label, report.tier.cta.url));
    lines
}

/// Split `lines` into fixed-height pages with footers.
pub fn paginate(lines: &[String], page_lines: usize) -> Result<Vec<String>, ExportError> {
    if page_lines < MIN_PAGE_LINES {
        return Err(ExportError::PageTooShort(page_lines));
    }
    let body = page_lines - 2;
    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(body).collect()
    };
    let total = chunks.len();

    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut page: Vec<String> = chunk.to_vec();
            page.resize(body, String::new());
            page.push(String::new());
            page.push(format!(
                "{:^PAGE_WIDTH$}",
                format!("Page {} of {}", i + 1, total)
            ));
            let mut text = page.join("\n");
            text.push('\n');
            text
        })
        .collect())
}

/// Full export document.
pub fn render_export(
    report: &ReadinessReport,
    lead: Option<&Lead>,
    page_lines: usize,
) -> Result<String, ExportError> {
    let pages = paginate(&report_lines(report, lead), page_lines)?;
    Ok(pages.join(&FORM_FEED.to_string()))
}

/// Render and write the export to `path`.
pub fn write_export(
    path: &Path,
    report: &ReadinessReport,
    lead: Option<&Lead>,
    page_lines: usize,
) -> Result<(), ExportError> {
    let document = render_export(report, lead, page_lines)?;
    std::fs::write(path, document).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!("Report exported to {}", path.display());
    Ok(())
}
