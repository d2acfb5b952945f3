//! Section value objects

use crate::bank::question::QuestionId;
use serde::{Deserialize, Serialize};

/// Stable identity of a section (e.g. `"transition_risk"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Recommendation copy for each band of a section's percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub high: String,
    pub mid: String,
    pub low: String,
}

impl Recommendations {
    pub fn new(high: impl Into<String>, mid: impl Into<String>, low: impl Into<String>) -> Self {
        Self {
            high: high.into(),
            mid: mid.into(),
            low: low.into(),
        }
    }
}

/// A named group of questions sharing a sub-score.
///
/// `max_score` must equal the sum of the member questions' maxima; the
/// [`QuestionBank`](crate::bank::QuestionBank) constructor enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub label: String,
    pub question_ids: Vec<QuestionId>,
    pub max_score: u32,
    pub recommendations: Recommendations,
}

impl Section {
    pub fn new(
        id: impl Into<SectionId>,
        label: impl Into<String>,
        question_ids: Vec<QuestionId>,
        max_score: u32,
        recommendations: Recommendations,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            question_ids,
            max_score,
            recommendations,
        }
    }
}
