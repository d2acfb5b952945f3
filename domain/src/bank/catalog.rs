//! Validated question bank
//!
//! [`QuestionBank`] is the only way sections, questions and benchmarks reach
//! the scoring engine. Construction checks every structural invariant, so a
//! malformed bank is a definition-time failure rather than a `NaN` in a
//! report.

use crate::bank::question::{Question, QuestionId, QuestionKind};
use crate::bank::section::{Section, SectionId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

/// Benchmark shown for a section that has no configured comparison value.
pub const DEFAULT_BENCHMARK: u32 = 50;

/// Configuration errors in a question bank definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Question bank has no sections")]
    NoSections,

    #[error("Duplicate question id '{0}'")]
    DuplicateQuestion(QuestionId),

    #[error("Duplicate section id '{0}'")]
    DuplicateSection(SectionId),

    #[error("Question '{question}' refers to unknown section '{section}'")]
    UnknownSection {
        question: QuestionId,
        section: SectionId,
    },

    #[error("Section '{section}' lists unknown question '{question}'")]
    UnknownQuestion {
        section: SectionId,
        question: QuestionId,
    },

    #[error("Question '{question}' is listed by both '{first}' and '{second}'")]
    OverlappingMembership {
        question: QuestionId,
        first: SectionId,
        second: SectionId,
    },

    #[error("Question '{0}' is not listed by any section")]
    Unassigned(QuestionId),

    #[error("Question '{question}' declares section '{declared}' but is listed by '{listed}'")]
    SectionMismatch {
        question: QuestionId,
        declared: SectionId,
        listed: SectionId,
    },

    #[error("Choice question '{0}' has no options")]
    EmptyChoice(QuestionId),

    #[error("Scale question '{question}' is invalid: {message}")]
    InvalidScale {
        question: QuestionId,
        message: String,
    },

    #[error("Section '{0}' has a maximum score of zero")]
    ZeroMaxScore(SectionId),

    #[error("Section '{section}' declares max score {declared} but its questions sum to {computed}")]
    MaxScoreMismatch {
        section: SectionId,
        declared: u32,
        computed: u32,
    },

    #[error("Maximum score of {0} does not fit in 32 bits")]
    ScoreOverflow(String),

    #[error("Benchmark for '{section}' is {value}, expected 0..=100")]
    BenchmarkOutOfRange { section: SectionId, value: u32 },

    #[error("Benchmark refers to unknown section '{0}'")]
    UnknownBenchmark(SectionId),
}

/// Ordered, validated sections and questions plus display benchmarks.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    sections: Vec<Section>,
    questions: Vec<Question>,
    benchmarks: BTreeMap<SectionId, u32>,
    total_max_score: u32,
    #[serde(skip)]
    index: HashMap<QuestionId, usize>,
}

impl QuestionBank {
    /// Validate and assemble a bank.
    ///
    /// Questions keep their declaration order (the order the flow presents
    /// them and the order of the notification transcript). Sections keep
    /// theirs (the order of section results).
    pub fn new(
        sections: Vec<Section>,
        questions: Vec<Question>,
        benchmarks: BTreeMap<SectionId, u32>,
    ) -> Result<Self, BankError> {
        if sections.is_empty() {
            return Err(BankError::NoSections);
        }

        let mut index = HashMap::with_capacity(questions.len());
        for (i, q) in questions.iter().enumerate() {
            if index.insert(q.id.clone(), i).is_some() {
                return Err(BankError::DuplicateQuestion(q.id.clone()));
            }
            validate_kind(q)?;
        }

        let mut section_ids = HashSet::with_capacity(sections.len());
        for s in &sections {
            if !section_ids.insert(s.id.clone()) {
                return Err(BankError::DuplicateSection(s.id.clone()));
            }
        }

        for q in &questions {
            if !section_ids.contains(&q.section) {
                return Err(BankError::UnknownSection {
                    question: q.id.clone(),
                    section: q.section.clone(),
                });
            }
        }

        let mut owner: HashMap<&QuestionId, &SectionId> = HashMap::new();
        for s in &sections {
            for qid in &s.question_ids {
                let Some(&i) = index.get(qid) else {
                    return Err(BankError::UnknownQuestion {
                        section: s.id.clone(),
                        question: qid.clone(),
                    });
                };
                if let Some(first) = owner.insert(qid, &s.id) {
                    return Err(BankError::OverlappingMembership {
                        question: qid.clone(),
                        first: first.clone(),
                        second: s.id.clone(),
                    });
                }
                if questions[i].section != s.id {
                    return Err(BankError::SectionMismatch {
                        question: qid.clone(),
                        declared: questions[i].section.clone(),
                        listed: s.id.clone(),
                    });
                }
            }
        }

        if let Some(q) = questions.iter().find(|q| !owner.contains_key(&q.id)) {
            return Err(BankError::Unassigned(q.id.clone()));
        }

        for s in &sections {
            let computed = member_max(&s.question_ids, &questions, &index)
                .ok_or_else(|| BankError::ScoreOverflow(format!("section '{}'", s.id)))?;
            if computed == 0 || s.max_score == 0 {
                return Err(BankError::ZeroMaxScore(s.id.clone()));
            }
            if computed != s.max_score {
                return Err(BankError::MaxScoreMismatch {
                    section: s.id.clone(),
                    declared: s.max_score,
                    computed,
                });
            }
        }

        for (section, &value) in &benchmarks {
            if !section_ids.contains(section) {
                return Err(BankError::UnknownBenchmark(section.clone()));
            }
            if value > 100 {
                return Err(BankError::BenchmarkOutOfRange {
                    section: section.clone(),
                    value,
                });
            }
        }

        let total_max_score = sections
            .iter()
            .try_fold(0u32, |total, s| total.checked_add(s.max_score))
            .ok_or_else(|| BankError::ScoreOverflow("the bank".to_string()))?;

        Ok(Self {
            sections,
            questions,
            benchmarks,
            total_max_score,
            index,
        })
    }

    /// Fill each section's `max_score` from its member questions.
    ///
    /// Unknown member ids are skipped here; [`QuestionBank::new`] reports them.
    /// A sum that overflows saturates, which `new` then rejects.
    pub fn derive_max_scores(sections: &mut [Section], questions: &[Question]) {
        let index: HashMap<QuestionId, usize> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| (q.id.clone(), i))
            .collect();
        for s in sections.iter_mut() {
            s.max_score = member_max(&s.question_ids, questions, &index).unwrap_or(u32::MAX);
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.index.get(id).map(|&i| &self.questions[i])
    }

    pub fn question_at(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Sum of every section's maximum; the denominator of the total score.
    pub fn total_max_score(&self) -> u32 {
        self.total_max_score
    }

    /// Comparison percentage for a section, [`DEFAULT_BENCHMARK`] if unset.
    pub fn benchmark(&self, section: &SectionId) -> u32 {
        self.benchmarks
            .get(section)
            .copied()
            .unwrap_or(DEFAULT_BENCHMARK)
    }

    pub fn benchmarks(&self) -> &BTreeMap<SectionId, u32> {
        &self.benchmarks
    }
}

/// Sum of member maxima, `None` on overflow.
fn member_max(
    ids: &[QuestionId],
    questions: &[Question],
    index: &HashMap<QuestionId, usize>,
) -> Option<u32> {
    ids.iter()
        .filter_map(|id| index.get(id))
        .try_fold(0u32, |sum, &i| sum.checked_add(questions[i].max_score()))
}

fn validate_kind(q: &Question) -> Result<(), BankError> {
    match &q.kind {
        QuestionKind::Choice { options } if options.is_empty() => {
            Err(BankError::EmptyChoice(q.id.clone()))
        }
        QuestionKind::Choice { .. } => Ok(()),
        QuestionKind::Scale {
            min,
            max,
            multiplier,
            default,
        } => {
            let invalid = |message: String| BankError::InvalidScale {
                question: q.id.clone(),
                message,
            };
            if min > max {
                return Err(invalid(format!("min {} exceeds max {}", min, max)));
            }
            if !multiplier.is_finite() || *multiplier < 0.0 {
                return Err(invalid(format!("multiplier {} must be finite and non-negative", multiplier)));
            }
            if f64::from(*max) * multiplier >= f64::from(u32::MAX) {
                return Err(invalid(format!("max {} x {} does not fit in 32 bits", max, multiplier)));
            }
            if !(*min..=*max).contains(default) {
                return Err(invalid(format!(
                    "default {} lies outside {}..={}",
                    default, min, max
                )));
            }
            Ok(())
        }
    }
}
