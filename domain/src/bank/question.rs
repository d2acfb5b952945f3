//! Question value objects

use crate::bank::section::SectionId;
use crate::scoring::rounding::round_half_up;
use serde::{Deserialize, Serialize};

/// Stable identity of a question (e.g. `"aum"`, `"client_loyalty"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One selectable answer of a [`QuestionKind::Choice`] question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub score: u32,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, score: u32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// How a question is answered and scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick exactly one of the ordered options.
    Choice { options: Vec<ChoiceOption> },
    /// Numeric slider over `min..=max`; the score is `round(value * multiplier)`.
    Scale {
        min: u32,
        max: u32,
        multiplier: f64,
        /// Position the slider shows before the user touches it.
        default: u32,
    },
}

impl QuestionKind {
    /// Highest score this question can contribute.
    pub fn max_score(&self) -> u32 {
        match self {
            QuestionKind::Choice { options } => {
                options.iter().map(|o| o.score).max().unwrap_or(0)
            }
            QuestionKind::Scale {
                max, multiplier, ..
            } => round_half_up(f64::from(*max) * multiplier),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionKind::Choice { .. })
    }
}

/// Default slider position: the middle of `min..=max`, rounded down.
pub fn midpoint(min: u32, max: u32) -> u32 {
    min + max.saturating_sub(min) / 2
}

/// A single question in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub section: SectionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn choice(
        id: impl Into<QuestionId>,
        section: impl Into<SectionId>,
        text: impl Into<String>,
        options: Vec<ChoiceOption>,
    ) -> Self {
        Self {
            id: id.into(),
            section: section.into(),
            text: text.into(),
            subtitle: None,
            kind: QuestionKind::Choice { options },
        }
    }

    pub fn scale(
        id: impl Into<QuestionId>,
        section: impl Into<SectionId>,
        text: impl Into<String>,
        min: u32,
        max: u32,
        multiplier: f64,
    ) -> Self {
        let default = midpoint(min, max);
        Self {
            id: id.into(),
            section: section.into(),
            text: text.into(),
            subtitle: None,
            kind: QuestionKind::Scale {
                min,
                max,
                multiplier,
                default,
            },
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn max_score(&self) -> u32 {
        self.kind.max_score()
    }

    /// Score earned by picking option `index`, or `None` for an out-of-range
    /// index or a non-choice question.
    pub fn score_for_option(&self, index: usize) -> Option<u32> {
        match &self.kind {
            QuestionKind::Choice { options } => options.get(index).map(|o| o.score),
            QuestionKind::Scale { .. } => None,
        }
    }

    /// Score earned by a slider position, or `None` when the value lies
    /// outside the range or the question is not a scale.
    pub fn score_for_value(&self, value: u32) -> Option<u32> {
        match &self.kind {
            QuestionKind::Scale {
                min,
                max,
                multiplier,
                ..
            } if (*min..=*max).contains(&value) => {
                Some(round_half_up(f64::from(value) * multiplier))
            }
            _ => None,
        }
    }

    /// Label of option `index` (choice questions only).
    pub fn option_label(&self, index: usize) -> Option<&str> {
        match &self.kind {
            QuestionKind::Choice { options } => options.get(index).map(|o| o.label.as_str()),
            QuestionKind::Scale { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> Question {
        Question::scale("confidence", "mindset", "How confident are you?", 1, 10, 3.0)
    }

    #[test]
    fn test_scale_score_rounds_value_times_multiplier() {
        assert_eq!(slider().score_for_value(7), Some(21));
    }

    #[test]
    fn test_scale_score_rounds_half_up() {
        let q = Question::scale("q", "s", "text", 0, 10, 1.5);
        // 3 * 1.5 = 4.5 -> 5
        assert_eq!(q.score_for_value(3), Some(5));
        assert_eq!(q.max_score(), 15);
    }

    #[test]
    fn test_scale_rejects_out_of_range_value() {
        assert_eq!(slider().score_for_value(0), None);
        assert_eq!(slider().score_for_value(11), None);
    }

    #[test]
    fn test_scale_default_is_midpoint() {
        match slider().kind {
            QuestionKind::Scale { default, .. } => assert_eq!(default, 5),
            QuestionKind::Choice { .. } => panic!("expected scale"),
        }
    }

    #[test]
    fn test_midpoint_near_upper_limit() {
        assert_eq!(midpoint(u32::MAX - 1, u32::MAX), u32::MAX - 1);
        assert_eq!(midpoint(0, u32::MAX), u32::MAX / 2);
        assert_eq!(midpoint(7, 3), 7);
    }

    #[test]
    fn test_choice_max_is_best_option() {
        let q = Question::choice(
            "aum",
            "book",
            "Assets under management?",
            vec![
                ChoiceOption::new("Under $50M", 1),
                ChoiceOption::new("$250M+", 5),
                ChoiceOption::new("$50M-$250M", 3),
            ],
        );
        assert_eq!(q.max_score(), 5);
        assert_eq!(q.score_for_option(2), Some(3));
        assert_eq!(q.score_for_option(3), None);
        assert_eq!(q.option_label(1), Some("$250M+"));
        assert_eq!(q.score_for_value(3), None);
    }

    #[test]
    fn test_kind_serializes_with_type_tag() {
        let json = serde_json::to_value(slider()).unwrap();
        assert_eq!(json["type"], "scale");
        assert_eq!(json["max"], 10);
    }
}
