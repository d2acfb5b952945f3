//! Progress display for the questionnaire

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Draws a progress line above each question.
///
/// One bar is drawn per question and left on screen, so the line editor's
/// prompt below it is never redrawn over.
pub struct AssessmentProgress {
    visible: bool,
}

impl AssessmentProgress {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    /// Show `position` (1-based) of `total`, labelled with the section.
    pub fn show(&self, position: usize, total: usize, percent: u32, section: &str) -> ProgressBar {
        let target = if self.visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(total as u64), target);
        bar.set_style(Self::style());
        bar.set_prefix(format!("{:>3}%", percent));
        bar.set_message(section.to_string());
        bar.set_position(position as u64);
        bar.abandon();
        bar
    }
}

impl Default for AssessmentProgress {
    fn default() -> Self {
        Self::new(true)
    }
}
