//! Answer sets and completed responses

use crate::bank::{Question, QuestionBank, QuestionId, QuestionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Earned score per question. Absent questions count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, u32>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the score for a question.
    pub fn insert(&mut self, question: QuestionId, score: u32) {
        self.0.insert(question, score);
    }

    /// Earned score, zero when the question was not answered.
    pub fn score(&self, question: &QuestionId) -> u32 {
        self.0.get(question).copied().unwrap_or(0)
    }

    pub fn contains(&self, question: &QuestionId) -> bool {
        self.0.contains_key(question)
    }

    /// Sum of every recorded score, regardless of section. Saturates.
    pub fn total(&self) -> u32 {
        self.0.values().fold(0u32, |sum, &v| sum.saturating_add(v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, u32)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }
}

impl FromIterator<(QuestionId, u32)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything a finished questionnaire produces.
///
/// The three groups are always committed to the session together: scores
/// feed the scoring engine, selections and slider values re-render prior
/// choices and the transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responses {
    #[serde(default)]
    pub scores: AnswerSet,
    #[serde(default)]
    pub selections: BTreeMap<QuestionId, usize>,
    #[serde(default)]
    pub sliders: BTreeMap<QuestionId, u32>,
}

/// Why a set of responses does not fit a bank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponsesError {
    #[error("Unknown question '{0}'")]
    UnknownQuestion(QuestionId),

    #[error("Question '{0}' has no answer")]
    Missing(QuestionId),

    #[error("Question '{question}' has no option {index}")]
    OptionOutOfRange { question: QuestionId, index: usize },

    #[error("Value {value} is outside the range of question '{question}'")]
    ValueOutOfRange { question: QuestionId, value: u32 },

    #[error("Score {score} cannot be earned on question '{question}'")]
    Unattainable { question: QuestionId, score: u32 },

    #[error("Question '{0}' does not take that kind of answer")]
    WrongKind(QuestionId),

    #[error("Question '{question}' records score {recorded} but its answer earns {derived}")]
    ScoreMismatch {
        question: QuestionId,
        recorded: u32,
        derived: u32,
    },
}

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check responses from outside the flow against `bank`.
    ///
    /// Every bank question needs an answer: an option index, a slider value,
    /// or a score one of those can earn. Scores are re-derived from the
    /// answers, and the returned responses carry all three groups.
    pub fn validate(&self, bank: &QuestionBank) -> Result<Responses, ResponsesError> {
        let mentioned = self
            .scores
            .0
            .keys()
            .chain(self.selections.keys())
            .chain(self.sliders.keys());
        for id in mentioned {
            if bank.question(id).is_none() {
                return Err(ResponsesError::UnknownQuestion(id.clone()));
            }
        }

        let mut checked = Responses::new();
        for question in bank.questions() {
            let id = &question.id;
            let recorded = self.scores.0.get(id).copied();
            let unattainable = |score| ResponsesError::Unattainable {
                question: id.clone(),
                score,
            };

            let derived = match &question.kind {
                QuestionKind::Choice { options } => {
                    if self.sliders.contains_key(id) {
                        return Err(ResponsesError::WrongKind(id.clone()));
                    }
                    let index = match (self.selections.get(id), recorded) {
                        (Some(&index), _) => index,
                        (None, Some(score)) => options
                            .iter()
                            .position(|o| o.score == score)
                            .ok_or_else(|| unattainable(score))?,
                        (None, None) => return Err(ResponsesError::Missing(id.clone())),
                    };
                    let score = question.score_for_option(index).ok_or_else(|| {
                        ResponsesError::OptionOutOfRange {
                            question: id.clone(),
                            index,
                        }
                    })?;
                    checked.selections.insert(id.clone(), index);
                    score
                }
                QuestionKind::Scale { .. } => {
                    if self.selections.contains_key(id) {
                        return Err(ResponsesError::WrongKind(id.clone()));
                    }
                    let value = match (self.sliders.get(id), recorded) {
                        (Some(&value), _) => value,
                        (None, Some(score)) => {
                            slider_for_score(question, score).ok_or_else(|| unattainable(score))?
                        }
                        (None, None) => return Err(ResponsesError::Missing(id.clone())),
                    };
                    let score = question.score_for_value(value).ok_or_else(|| {
                        ResponsesError::ValueOutOfRange {
                            question: id.clone(),
                            value,
                        }
                    })?;
                    checked.sliders.insert(id.clone(), value);
                    score
                }
            };

            if let Some(recorded) = recorded
                && recorded != derived
            {
                return Err(ResponsesError::ScoreMismatch {
                    question: id.clone(),
                    recorded,
                    derived,
                });
            }
            checked.scores.insert(id.clone(), derived);
        }
        Ok(checked)
    }
}

/// A slider position that earns `score`, nearest to `score / multiplier`.
///
/// Scale scores are non-decreasing in the value, so clamping the estimate
/// into the range and checking its neighbours finds a match if one exists.
fn slider_for_score(question: &Question, score: u32) -> Option<u32> {
    let QuestionKind::Scale {
        min,
        max,
        multiplier,
        ..
    } = question.kind
    else {
        return None;
    };
    if multiplier == 0.0 {
        return (score == 0).then_some(min);
    }
    let estimate = (f64::from(score) / multiplier)
        .clamp(f64::from(min), f64::from(max))
        .round() as u32;
    (estimate.saturating_sub(1)..=estimate.saturating_add(1))
        .find(|&value| question.score_for_value(value) == Some(score))
}
