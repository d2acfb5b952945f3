//! Scoring engine: pure functions from an answer set to section results,
//! a total percentage, a readiness tier and presentation bands.
//!
//! - [`engine`] — section aggregation, weighted total, gap ranking
//! - [`tier::Tier`] — the four readiness tiers
//! - [`band::ScoreBand`] — colour/priority bands for display

pub mod answer;
pub mod band;
pub mod engine;
pub mod rounding;
pub mod tier;

pub use answer::{AnswerSet, Responses, ResponsesError};
pub use band::ScoreBand;
pub use engine::{
    RecommendationLevel, SectionResult, compute_section_results, compute_total_percentage,
    primary_gap, rank_sections,
};
pub use rounding::{percent_of, round_half_up};
pub use tier::{CallToAction, Tier, TierInfo, classify_tier};
