//! Lead notification payload
//!
//! The flat record sent to the mail renderer when a lead is captured. The
//! transcript line order is part of the contract with the renderer:
//! every question in declaration order, a blank line, the total score, then
//! one line per section.

use crate::bank::{QuestionBank, QuestionKind};
use crate::lead::Lead;
use crate::report::ReadinessReport;
use crate::scoring::Responses;
use serde::{Deserialize, Serialize};

/// Stand-in for an optional field the lead left blank.
pub const PLACEHOLDER: &str = "—";

/// Stand-in for a question without a recorded answer.
pub const NOT_ANSWERED: &str = "N/A";

/// Payload for one captured lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadNotification {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub firm: String,
    /// `"<total>/100"`
    pub score: String,
    /// Tier label, e.g. `"Early Stage"`
    pub tier: String,
    /// Multi-line plain-text transcript
    pub answers: String,
}

impl LeadNotification {
    pub fn new(
        lead: &Lead,
        bank: &QuestionBank,
        responses: &Responses,
        report: &ReadinessReport,
    ) -> Self {
        Self {
            name: lead.name().to_string(),
            email: lead.email().to_string(),
            phone: lead.phone().unwrap_or(PLACEHOLDER).to_string(),
            firm: lead.firm().unwrap_or(PLACEHOLDER).to_string(),
            score: report.score_label(),
            tier: report.tier.label.to_string(),
            answers: transcript(bank, responses, report),
        }
    }

    /// Mail subject line: `BB Assessment: <name> — <tier> (<score>)`.
    pub fn subject(&self) -> String {
        format!("BB Assessment: {} — {} ({})", self.name, self.tier, self.score)
    }
}

/// Render the plain-text transcript of a finished assessment.
pub fn transcript(bank: &QuestionBank, responses: &Responses, report: &ReadinessReport) -> String {
    let mut lines: Vec<String> = bank
        .questions()
        .iter()
        .map(|q| {
            let answer = match &q.kind {
                QuestionKind::Choice { .. } => responses
                    .selections
                    .get(&q.id)
                    .and_then(|&i| q.option_label(i))
                    .map(str::to_string),
                QuestionKind::Scale { max, .. } => {
                    let value = responses.sliders.get(&q.id).map(u32::to_string);
                    Some(format!("{}/{}", value.as_deref().unwrap_or(NOT_ANSWERED), max))
                }
            };
            format!("{}: {}", q.text, answer.as_deref().unwrap_or(NOT_ANSWERED))
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "SCORE: {} ({})",
        report.score_label(),
        report.tier.label
    ));
    lines.extend(
        report
            .sections
            .iter()
            .map(|s| format!("{}: {}%", s.label, s.percentage)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{ChoiceOption, Question, Recommendations, Section};
    use crate::lead::LeadForm;
    use crate::report::DEFAULT_WEAKEST_COUNT;
    use std::collections::BTreeMap;

    fn small_bank() -> QuestionBank {
        let questions = vec![
            Question::choice(
                "team",
                "ops",
                "Team size?",
                vec![ChoiceOption::new("Solo", 1), ChoiceOption::new("Five+", 5)],
            ),
            Question::scale("grit", "mind", "Appetite for ownership?", 1, 10, 0.5),
            Question::choice(
                "plan",
                "ops",
                "Continuity plan?",
                vec![ChoiceOption::new("No", 0), ChoiceOption::new("Yes", 5)],
            ),
        ];
        let recs = || Recommendations::new("h", "m", "l");
        let sections = vec![
            Section::new("ops", "Operations", vec!["team".into(), "plan".into()], 10, recs()),
            Section::new("mind", "Mindset", vec!["grit".into()], 5, recs()),
        ];
        QuestionBank::new(sections, questions, BTreeMap::new()).unwrap()
    }

    fn responses() -> Responses {
        let mut r = Responses::new();
        r.scores.insert("team".into(), 5);
        r.selections.insert("team".into(), 1);
        r.scores.insert("grit".into(), 4);
        r.sliders.insert("grit".into(), 7);
        r
    }

    fn lead(phone: &str) -> Lead {
        Lead::parse(&LeadForm {
            name: "Sam Ortiz".to_string(),
            email: "sam@ortiz.example".to_string(),
            phone: phone.to_string(),
            firm: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_transcript_line_order() {
        let bank = small_bank();
        let responses = responses();
        let report = ReadinessReport::evaluate(&bank, &responses.scores, DEFAULT_WEAKEST_COUNT);

        let text = transcript(&bank, &responses, &report);
        let expected = "\
Team size?: Five+
Appetite for ownership?: 7/10
Continuity plan?: N/A

SCORE: 60/100 (Moderate Readiness)
Operations: 50%
Mindset: 80%";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_transcript_unanswered_scale_keeps_range() {
        let bank = small_bank();
        let mut responses = responses();
        responses.sliders.clear();
        let report = ReadinessReport::evaluate(&bank, &responses.scores, DEFAULT_WEAKEST_COUNT);

        let text = transcript(&bank, &responses, &report);
        assert!(text.contains("Appetite for ownership?: N/A/10\n"));
        assert!(text.contains("Continuity plan?: N/A\n"));
    }

    #[test]
    fn test_payload_placeholders() {
        let bank = small_bank();
        let responses = responses();
        let report = ReadinessReport::evaluate(&bank, &responses.scores, DEFAULT_WEAKEST_COUNT);

        let payload = LeadNotification::new(&lead(""), &bank, &responses, &report);
        assert_eq!(payload.phone, PLACEHOLDER);
        assert_eq!(payload.firm, PLACEHOLDER);
        assert_eq!(payload.score, "60/100");
        assert_eq!(payload.tier, "Moderate Readiness");

        let payload = LeadNotification::new(&lead("555-0100"), &bank, &responses, &report);
        assert_eq!(payload.phone, "555-0100");
    }

    #[test]
    fn test_payload_json_shape() {
        let bank = small_bank();
        let responses = responses();
        let report = ReadinessReport::evaluate(&bank, &responses.scores, DEFAULT_WEAKEST_COUNT);
        let payload = LeadNotification::new(&lead(""), &bank, &responses, &report);

        let json = serde_json::to_value(&payload).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["answers", "email", "firm", "name", "phone", "score", "tier"]
        );
    }

    #[test]
    fn test_subject_line() {
        let bank = small_bank();
        let responses = responses();
        let report = ReadinessReport::evaluate(&bank, &responses.scores, DEFAULT_WEAKEST_COUNT);
        let payload = LeadNotification::new(&lead(""), &bank, &responses, &report);
        assert_eq!(
            payload.subject(),
            "BB Assessment: Sam Ortiz — Moderate Readiness (60/100)"
        );
    }
}
