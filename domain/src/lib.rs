//! Domain layer for breakaway-blueprint
//!
//! This crate contains the question bank, the scoring engine and the lead
//! model. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Question Bank
//!
//! An ordered list of questions partitioned into sections. Each question is
//! either a `Choice` (options with fixed scores) or a `Scale` (a slider whose
//! value is multiplied into a score). The bank is validated once at
//! construction; a malformed bank is a configuration error.
//!
//! ## Scoring
//!
//! - **Section results**: earned over maximum per section, rounded half up
//! - **Total percentage**: raw weighted sum over the bank maximum
//! - **Tier**: High Readiness / Moderate Readiness / Early Stage / Not Yet Ready
//! - **Gaps**: the weakest sections, stable-ranked by percentage

pub mod bank;
pub mod config;
pub mod lead;
pub mod notification;
pub mod report;
pub mod scoring;
pub mod util;

// Re-export commonly used types
pub use bank::{
    BankError, ChoiceOption, Question, QuestionBank, QuestionId, QuestionKind, Recommendations,
    Section, SectionId,
};
pub use config::{ConfigIssue, ConfigIssueCode, ReportFormat, Severity};
pub use lead::{FieldError, Lead, LeadField, LeadForm, LeadValidationErrors};
pub use notification::LeadNotification;
pub use report::{BenchmarkComparison, DEFAULT_WEAKEST_COUNT, ReadinessReport};
pub use scoring::{
    AnswerSet, RecommendationLevel, Responses, ResponsesError, ScoreBand, SectionResult, Tier,
    TierInfo, classify_tier, compute_section_results, compute_total_percentage, primary_gap,
    rank_sections,
};
