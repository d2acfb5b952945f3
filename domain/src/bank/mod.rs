//! Static question bank: sections, questions and display benchmarks.
//!
//! - [`question::Question`] — a single choice or scale question
//! - [`section::Section`] — a scored group of questions with recommendations
//! - [`catalog::QuestionBank`] — the validated, ordered bank
//!
//! The standard bank lives in `builtin`; alternative banks can be loaded by
//! the infrastructure layer and validated through [`QuestionBank::new`].

mod builtin;
pub mod catalog;
pub mod question;
pub mod section;

pub use catalog::{BankError, DEFAULT_BENCHMARK, QuestionBank};
pub use question::{ChoiceOption, Question, QuestionId, QuestionKind, midpoint};
pub use section::{Recommendations, Section, SectionId};
