//! Colour bands for presenting a percentage.
//!
//! The thresholds (`≥70`, `≥45`, `≥25`) are presentation-only and are kept
//! apart from the tier and recommendation thresholds.

use serde::{Deserialize, Serialize};

/// Presentation band of a percentage, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Red,
    Orange,
    Yellow,
    Green,
}

impl ScoreBand {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            70.. => ScoreBand::Green,
            45..70 => ScoreBand::Yellow,
            25..45 => ScoreBand::Orange,
            _ => ScoreBand::Red,
        }
    }

    fn token(&self) -> &'static str {
        match self {
            ScoreBand::Green => "score-green",
            ScoreBand::Yellow => "score-yellow",
            ScoreBand::Orange => "score-orange",
            ScoreBand::Red => "score-red",
        }
    }

    /// CSS colour value, e.g. `hsl(var(--score-green))`.
    pub fn css_color(&self) -> String {
        format!("hsl(var(--{}))", self.token())
    }

    /// Utility class for text in this colour.
    pub fn text_class(&self) -> String {
        format!("text-[hsl(var(--{}))]", self.token())
    }

    /// Utility class for a background in this colour.
    pub fn bg_class(&self) -> String {
        format!("bg-[hsl(var(--{}))]", self.token())
    }

    /// Attention priority, 1 being the most urgent.
    pub fn priority(&self) -> u8 {
        match self {
            ScoreBand::Red => 1,
            ScoreBand::Orange => 2,
            ScoreBand::Yellow => 3,
            ScoreBand::Green => 4,
        }
    }

    pub fn priority_label(&self) -> &'static str {
        match self {
            ScoreBand::Red => "Critical",
            ScoreBand::Orange => "High",
            ScoreBand::Yellow => "Watch",
            ScoreBand::Green => "On track",
        }
    }
}
