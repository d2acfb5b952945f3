//! TOML question bank loader
//!
//! A bank file declares `[[sections]]`, `[[questions]]` and an optional
//! `[benchmarks]` table. Section membership and maxima may be omitted: a
//! section without a `questions` list takes every question naming it, in
//! declaration order, and a section without `max_score` sums its members.
//!
//! ```toml
//! [[sections]]
//! id = "team"
//! label = "Team & Operations"
//! recommendations = { high = "...", mid = "...", low = "..." }
//!
//! [[questions]]
//! id = "team_size"
//! section = "team"
//! text = "How many people support your practice today?"
//! type = "choice"
//! options = [{ label = "Just me", score = 1 }, { label = "Five or more", score = 5 }]
//!
//! [[questions]]
//! id = "ownership_appetite"
//! section = "team"
//! text = "How much do you want to run your own business?"
//! type = "scale"
//! min = 1
//! max = 10
//! multiplier = 0.5
//!
//! [benchmarks]
//! team = 52
//! ```

use blueprint_domain::{
    BankError, ChoiceOption, Question, QuestionBank, QuestionId, QuestionKind, Recommendations,
    Section, SectionId, bank::midpoint,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors loading a bank file.
#[derive(Error, Debug)]
pub enum BankLoadError {
    #[error("Failed to read bank file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse bank file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid bank {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: BankError,
    },
}

#[derive(Debug, Deserialize)]
struct RawBank {
    sections: Vec<RawSection>,
    #[serde(default)]
    questions: Vec<RawQuestion>,
    #[serde(default)]
    benchmarks: BTreeMap<SectionId, u32>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    id: SectionId,
    label: String,
    questions: Option<Vec<QuestionId>>,
    max_score: Option<u32>,
    recommendations: Recommendations,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: QuestionId,
    section: SectionId,
    text: String,
    subtitle: Option<String>,
    #[serde(flatten)]
    kind: RawKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawKind {
    Choice {
        options: Vec<ChoiceOption>,
    },
    Scale {
        min: u32,
        max: u32,
        #[serde(default = "unit_multiplier")]
        multiplier: f64,
        default: Option<u32>,
    },
}

fn unit_multiplier() -> f64 {
    1.0
}

impl From<RawQuestion> for Question {
    fn from(raw: RawQuestion) -> Self {
        let kind = match raw.kind {
            RawKind::Choice { options } => QuestionKind::Choice { options },
            RawKind::Scale {
                min,
                max,
                multiplier,
                default,
            } => QuestionKind::Scale {
                min,
                max,
                multiplier,
                default: default.unwrap_or_else(|| midpoint(min, max)),
            },
        };
        Question {
            id: raw.id,
            section: raw.section,
            text: raw.text,
            subtitle: raw.subtitle,
            kind,
        }
    }
}

/// Build a bank from TOML text. `origin` only labels errors.
pub fn parse_bank(text: &str, origin: &Path) -> Result<QuestionBank, BankLoadError> {
    let raw: RawBank = toml::from_str(text).map_err(|source| BankLoadError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    let questions: Vec<Question> = raw.questions.into_iter().map(Question::from).collect();

    let declared: Vec<Option<u32>> = raw.sections.iter().map(|s| s.max_score).collect();
    let mut sections: Vec<Section> = raw
        .sections
        .into_iter()
        .map(|s| {
            let question_ids = s.questions.unwrap_or_else(|| {
                questions
                    .iter()
                    .filter(|q| q.section == s.id)
                    .map(|q| q.id.clone())
                    .collect()
            });
            Section::new(
                s.id,
                s.label,
                question_ids,
                s.max_score.unwrap_or(0),
                s.recommendations,
            )
        })
        .collect();

    if declared.iter().any(Option::is_none) {
        debug!("Deriving section maxima for {}", origin.display());
        QuestionBank::derive_max_scores(&mut sections, &questions);
        // Declared maxima are kept so a mismatch is still reported.
        for (section, declared) in sections.iter_mut().zip(declared) {
            if let Some(max) = declared {
                section.max_score = max;
            }
        }
    }

    QuestionBank::new(sections, questions, raw.benchmarks).map_err(|source| {
        BankLoadError::Invalid {
            path: origin.to_path_buf(),
            source,
        }
    })
}

/// Read and validate a bank file.
pub fn load_bank(path: &Path) -> Result<QuestionBank, BankLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| BankLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let bank = parse_bank(&text, path)?;
    info!(
        "Loaded question bank {} ({} sections, {} questions)",
        path.display(),
        bank.sections().len(),
        bank.len()
    );
    Ok(bank)
}
