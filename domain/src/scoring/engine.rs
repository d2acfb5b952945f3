//! Section aggregation, total percentage and gap ranking.
//!
//! Every function here is pure: the same answer set always produces the same
//! results, and inputs are never mutated.

use crate::bank::{Section, SectionId};
use crate::scoring::answer::AnswerSet;
use crate::scoring::rounding::percent_of;
use serde::{Deserialize, Serialize};

/// Which recommendation text a section percentage selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationLevel {
    High,
    Mid,
    Low,
}

impl RecommendationLevel {
    /// `≥70 → High`, `≥40 → Mid`, otherwise `Low`.
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            70.. => RecommendationLevel::High,
            40..70 => RecommendationLevel::Mid,
            _ => RecommendationLevel::Low,
        }
    }
}

/// Derived score for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionResult {
    pub id: SectionId,
    pub label: String,
    pub earned: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub level: RecommendationLevel,
    pub recommendation: String,
}

/// Score every section in declaration order.
pub fn compute_section_results(answers: &AnswerSet, sections: &[Section]) -> Vec<SectionResult> {
    sections
        .iter()
        .map(|s| {
            let earned = s
                .question_ids
                .iter()
                .fold(0u32, |sum, id| sum.saturating_add(answers.score(id)));
            let percentage = percent_of(earned, s.max_score);
            let level = RecommendationLevel::from_percentage(percentage);
            let recommendation = match level {
                RecommendationLevel::High => &s.recommendations.high,
                RecommendationLevel::Mid => &s.recommendations.mid,
                RecommendationLevel::Low => &s.recommendations.low,
            };
            SectionResult {
                id: s.id.clone(),
                label: s.label.clone(),
                earned,
                max_score: s.max_score,
                percentage,
                level,
                recommendation: recommendation.clone(),
            }
        })
        .collect()
}

/// Raw weighted total: every recorded score over the bank maximum.
///
/// This is deliberately not the mean of section percentages; the two differ
/// whenever section maxima differ.
pub fn compute_total_percentage(answers: &AnswerSet, total_max_score: u32) -> u32 {
    percent_of(answers.total(), total_max_score)
}

/// The `n` weakest sections, ascending by percentage.
///
/// The sort is stable, so equal percentages keep declaration order.
pub fn rank_sections(results: &[SectionResult], n: usize) -> Vec<SectionResult> {
    let mut ranked: Vec<&SectionResult> = results.iter().collect();
    ranked.sort_by_key(|r| r.percentage);
    ranked.into_iter().take(n).cloned().collect()
}

/// The single weakest section; `None` only for an empty result list.
pub fn primary_gap(results: &[SectionResult]) -> Option<SectionResult> {
    rank_sections(results, 1).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{QuestionId, Recommendations};

    fn section(id: &str, questions: &[&str], max: u32) -> Section {
        Section::new(
            id,
            id.to_uppercase(),
            questions.iter().map(|&q| QuestionId::from(q)).collect(),
            max,
            Recommendations::new(
                format!("{} high", id),
                format!("{} mid", id),
                format!("{} low", id),
            ),
        )
    }

    fn three_sections() -> Vec<Section> {
        vec![
            section("a", &["a1", "a2"], 20),
            section("b", &["b1", "b2"], 30),
            section("c", &["c1"], 10),
        ]
    }

    fn answers(pairs: &[(&str, u32)]) -> AnswerSet {
        pairs.iter().map(|&(q, s)| (QuestionId::from(q), s)).collect()
    }

    #[test]
    fn test_oversized_answers_saturate() {
        let results = compute_section_results(
            &answers(&[("a1", u32::MAX), ("a2", u32::MAX)]),
            &three_sections(),
        );
        assert_eq!(results[0].earned, u32::MAX);
    }

    #[test]
    fn test_weighted_scenario() {
        let sections = three_sections();
        let answers = answers(&[("a1", 6), ("a2", 4), ("b1", 15), ("b2", 15), ("c1", 5)]);

        let results = compute_section_results(&answers, &sections);
        let pcts: Vec<u32> = results.iter().map(|r| r.percentage).collect();
        assert_eq!(pcts, vec![50, 100, 50]);

        let total = compute_total_percentage(&answers, 60);
        assert_eq!(total, 75);
        assert_eq!(
            crate::scoring::classify_tier(total),
            crate::scoring::Tier::ModerateReadiness
        );
    }

    #[test]
    fn test_total_is_not_average_of_sections() {
        let sections = three_sections();
        // Only the smallest section is answered: {0, 0, 100} averages to 33,
        // but 10 of 60 points is 17.
        let answers = answers(&[("c1", 10)]);
        let results = compute_section_results(&answers, &sections);
        let mean = results.iter().map(|r| r.percentage).sum::<u32>() / 3;
        assert_eq!(mean, 33);
        assert_eq!(compute_total_percentage(&answers, 60), 17);
    }

    #[test]
    fn test_empty_answers() {
        let sections = three_sections();
        let empty = AnswerSet::new();
        let results = compute_section_results(&empty, &sections);
        assert!(results.iter().all(|r| r.percentage == 0 && r.earned == 0));
        assert_eq!(compute_total_percentage(&empty, 60), 0);
        assert_eq!(primary_gap(&results).unwrap().id.as_str(), "a");
    }

    #[test]
    fn test_recommendation_selection() {
        let sections = vec![section("s", &["q"], 100)];
        let pick = |score| {
            let results = compute_section_results(&answers(&[("q", score)]), &sections);
            (results[0].level, results[0].recommendation.clone())
        };
        assert_eq!(pick(70), (RecommendationLevel::High, "s high".to_string()));
        assert_eq!(pick(69), (RecommendationLevel::Mid, "s mid".to_string()));
        assert_eq!(pick(40), (RecommendationLevel::Mid, "s mid".to_string()));
        assert_eq!(pick(39), (RecommendationLevel::Low, "s low".to_string()));
    }

    #[test]
    fn test_section_earned_sums_to_answer_total() {
        let sections = three_sections();
        let answers = answers(&[("a1", 3), ("b2", 12), ("c1", 7), ("b1", 1)]);
        let results = compute_section_results(&answers, &sections);
        let earned: u32 = results.iter().map(|r| r.earned).sum();
        assert_eq!(earned, answers.total());
    }

    #[test]
    fn test_rank_sections_is_stable_and_ascending() {
        let sections = three_sections();
        let answers = answers(&[("a1", 10), ("b1", 3), ("c1", 1)]);
        let results = compute_section_results(&answers, &sections);
        // a = 50, b = 10, c = 10
        let ranked = rank_sections(&results, 3);
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(ranked.windows(2).all(|w| w[0].percentage <= w[1].percentage));
    }

    #[test]
    fn test_rank_sections_does_not_mutate_input() {
        let sections = three_sections();
        let answers = answers(&[("a1", 20)]);
        let results = compute_section_results(&answers, &sections);
        let before = results.clone();
        let _ = rank_sections(&results, 2);
        assert_eq!(results, before);
    }

    #[test]
    fn test_rank_sections_truncates() {
        let sections = three_sections();
        let results = compute_section_results(&AnswerSet::new(), &sections);
        assert_eq!(rank_sections(&results, 2).len(), 2);
        assert_eq!(rank_sections(&results, 10).len(), 3);
        assert!(rank_sections(&results, 0).is_empty());
    }

    #[test]
    fn test_primary_gap_matches_first_ranked() {
        let sections = three_sections();
        let answers = answers(&[("a1", 2), ("b1", 30), ("c1", 9)]);
        let results = compute_section_results(&answers, &sections);
        assert_eq!(
            primary_gap(&results),
            rank_sections(&results, 1).into_iter().next()
        );
        assert!(primary_gap(&[]).is_none());
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let sections = three_sections();
        let answers = answers(&[("a1", 5), ("b2", 9)]);
        let first = compute_section_results(&answers, &sections);
        let second = compute_section_results(&answers, &sections);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
