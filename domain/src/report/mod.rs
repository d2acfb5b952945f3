//! Readiness report: everything the results screen shows, computed in one
//! pass from a finished answer set.

use crate::bank::{QuestionBank, SectionId};
use crate::scoring::{
    AnswerSet, ScoreBand, SectionResult, Tier, TierInfo, compute_section_results,
    compute_total_percentage, primary_gap, rank_sections,
};
use serde::Serialize;

/// Number of weakest sections on the priority roadmap.
pub const DEFAULT_WEAKEST_COUNT: usize = 3;

/// One section's percentage next to its benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkComparison {
    pub section: SectionId,
    pub label: String,
    pub yours: u32,
    pub benchmark: u32,
}

impl BenchmarkComparison {
    /// Percentage points above (positive) or below the benchmark.
    pub fn delta(&self) -> i64 {
        i64::from(self.yours) - i64::from(self.benchmark)
    }
}

/// Complete scoring output for a finished assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessReport {
    pub total_percentage: u32,
    pub tier: TierInfo,
    pub band: ScoreBand,
    pub sections: Vec<SectionResult>,
    pub weakest: Vec<SectionResult>,
    pub primary_gap: SectionResult,
    pub comparisons: Vec<BenchmarkComparison>,
}

impl ReadinessReport {
    /// Score `answers` against `bank`.
    ///
    /// A validated bank always has at least one section, so the primary gap
    /// is always present.
    pub fn evaluate(bank: &QuestionBank, answers: &AnswerSet, weakest_count: usize) -> Self {
        let sections = compute_section_results(answers, bank.sections());
        let total_percentage = compute_total_percentage(answers, bank.total_max_score());
        let weakest = rank_sections(&sections, weakest_count);
        let primary_gap = primary_gap(&sections)
            .unwrap_or_else(|| unreachable!("validated banks have at least one section"));

        let comparisons = sections
            .iter()
            .map(|s| BenchmarkComparison {
                section: s.id.clone(),
                label: s.label.clone(),
                yours: s.percentage,
                benchmark: bank.benchmark(&s.id),
            })
            .collect();

        Self {
            total_percentage,
            tier: Tier::classify(total_percentage).info(),
            band: ScoreBand::from_percentage(total_percentage),
            sections,
            weakest,
            primary_gap,
            comparisons,
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier.tier
    }

    /// `"<total>/100"`, the score string used in notifications.
    pub fn score_label(&self) -> String {
        format!("{}/100", self.total_percentage)
    }
}
