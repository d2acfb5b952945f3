//! Question-by-question assessment flow.
//!
//! Holds the cursor and the in-progress responses. Answers can be changed
//! freely while the flow is active; advancing past the last question freezes
//! the flow and hands out the finished [`Responses`]. Partial responses never
//! leave this type.

use blueprint_domain::{Question, QuestionBank, QuestionId, QuestionKind, Responses};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Invalid interaction with the flow. The flow state is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Question '{0}' is not a multiple-choice question")]
    NotAChoice(QuestionId),

    #[error("Question '{0}' is not a scale question")]
    NotAScale(QuestionId),

    #[error("Option {index} does not exist for '{question}' ({len} options)")]
    OptionOutOfRange {
        question: QuestionId,
        index: usize,
        len: usize,
    },

    #[error("Value {value} is outside {min}..={max} for '{question}'")]
    ValueOutOfRange {
        question: QuestionId,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Question '{0}' must be answered before continuing")]
    Unanswered(QuestionId),

    #[error("The assessment is already complete")]
    Finished,
}

/// Where the flow went after a navigation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowTransition {
    /// Now showing the question at this position.
    Question(usize),
    /// Every question was visited; the responses are final.
    Completed(Responses),
    /// Went back from the first question.
    ExitToLanding,
}

/// In-progress assessment over a question bank.
#[derive(Debug, Clone)]
pub struct AssessmentFlow {
    bank: Arc<QuestionBank>,
    position: usize,
    responses: Responses,
    finished: bool,
}

impl AssessmentFlow {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            position: 0,
            responses: Responses::new(),
            finished: false,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Zero-based position of the current question.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Share of the questionnaire reached, counting the current question.
    pub fn progress_percent(&self) -> u32 {
        if self.total() == 0 {
            return 100;
        }
        ((self.position + 1) * 100 / self.total()) as u32
    }

    pub fn current(&self) -> &Question {
        &self.bank.questions()[self.position]
    }

    /// Option index chosen for the current question, if any.
    pub fn selection(&self) -> Option<usize> {
        self.responses.selections.get(&self.current().id).copied()
    }

    /// Position the slider shows: the recorded value or the default.
    pub fn slider_position(&self) -> Option<u32> {
        match &self.current().kind {
            QuestionKind::Scale { default, .. } => Some(
                self.responses
                    .sliders
                    .get(&self.current().id)
                    .copied()
                    .unwrap_or(*default),
            ),
            QuestionKind::Choice { .. } => None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.responses.scores.contains(&self.current().id)
    }

    fn ensure_active(&self) -> Result<(), FlowError> {
        if self.finished {
            Err(FlowError::Finished)
        } else {
            Ok(())
        }
    }

    /// Pick an option of the current choice question and move on.
    pub fn select_option(&mut self, index: usize) -> Result<FlowTransition, FlowError> {
        self.ensure_active()?;
        let question = self.current();
        let QuestionKind::Choice { options } = &question.kind else {
            return Err(FlowError::NotAChoice(question.id.clone()));
        };
        let Some(option) = options.get(index) else {
            return Err(FlowError::OptionOutOfRange {
                question: question.id.clone(),
                index,
                len: options.len(),
            });
        };

        let id = question.id.clone();
        let score = option.score;
        debug!("{} -> option {} (score {})", id, index, score);
        self.responses.selections.insert(id.clone(), index);
        self.responses.scores.insert(id, score);
        self.advance()
    }

    /// Move the slider of the current scale question.
    pub fn set_slider(&mut self, value: u32) -> Result<(), FlowError> {
        self.ensure_active()?;
        let question = self.current();
        let QuestionKind::Scale { min, max, .. } = &question.kind else {
            return Err(FlowError::NotAScale(question.id.clone()));
        };
        let Some(score) = question.score_for_value(value) else {
            return Err(FlowError::ValueOutOfRange {
                question: question.id.clone(),
                value,
                min: *min,
                max: *max,
            });
        };

        let id = question.id.clone();
        debug!("{} -> slider {} (score {})", id, value, score);
        self.responses.sliders.insert(id.clone(), value);
        self.responses.scores.insert(id, score);
        Ok(())
    }

    /// Continue to the next question, or finish after the last one.
    ///
    /// A choice question must be answered first. An untouched scale question
    /// records the default position it was showing.
    pub fn advance(&mut self) -> Result<FlowTransition, FlowError> {
        self.ensure_active()?;
        if !self.is_answered() {
            match &self.current().kind {
                QuestionKind::Choice { .. } => {
                    return Err(FlowError::Unanswered(self.current().id.clone()));
                }
                QuestionKind::Scale { default, .. } => self.set_slider(*default)?,
            }
        }

        if self.position + 1 < self.total() {
            self.position += 1;
            Ok(FlowTransition::Question(self.position))
        } else {
            self.finished = true;
            debug!("Assessment complete with {} answers", self.responses.scores.len());
            Ok(FlowTransition::Completed(self.responses.clone()))
        }
    }

    /// Go back one question; from the first question, leave the flow.
    pub fn retreat(&mut self) -> Result<FlowTransition, FlowError> {
        self.ensure_active()?;
        if self.position == 0 {
            Ok(FlowTransition::ExitToLanding)
        } else {
            self.position -= 1;
            Ok(FlowTransition::Question(self.position))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_domain::{ChoiceOption, Recommendations, Section};
    use std::collections::BTreeMap;

    fn bank() -> Arc<QuestionBank> {
        let questions = vec![
            Question::choice(
                "team",
                "ops",
                "Team size?",
                vec![ChoiceOption::new("Solo", 1), ChoiceOption::new("Five+", 5)],
            ),
            Question::scale("grit", "mind", "Appetite for ownership?", 1, 10, 3.0),
        ];
        let recs = || Recommendations::new("h", "m", "l");
        let sections = vec![
            Section::new("ops", "Operations", vec!["team".into()], 5, recs()),
            Section::new("mind", "Mindset", vec!["grit".into()], 30, recs()),
        ];
        Arc::new(QuestionBank::new(sections, questions, BTreeMap::new()).unwrap())
    }

    #[test]
    fn test_select_option_records_and_advances() {
        let mut flow = AssessmentFlow::new(bank());
        assert_eq!(flow.select_option(1), Ok(FlowTransition::Question(1)));
        assert_eq!(flow.position(), 1);
        assert_eq!(flow.progress_percent(), 100);
    }

    #[test]
    fn test_slider_score_uses_multiplier() {
        let mut flow = AssessmentFlow::new(bank());
        flow.select_option(0).unwrap();
        flow.set_slider(7).unwrap();
        match flow.advance().unwrap() {
            FlowTransition::Completed(responses) => {
                assert_eq!(responses.scores.score(&"grit".into()), 21);
                assert_eq!(responses.sliders.get(&"grit".into()), Some(&7));
                assert_eq!(responses.selections.get(&"team".into()), Some(&0));
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert!(flow.is_finished());
    }

    #[test]
    fn test_unanswered_choice_blocks_advance() {
        let mut flow = AssessmentFlow::new(bank());
        assert_eq!(
            flow.advance(),
            Err(FlowError::Unanswered("team".into()))
        );
        assert_eq!(flow.position(), 0);
    }

    #[test]
    fn test_untouched_slider_commits_default() {
        let mut flow = AssessmentFlow::new(bank());
        flow.select_option(1).unwrap();
        assert_eq!(flow.slider_position(), Some(5));
        match flow.advance().unwrap() {
            FlowTransition::Completed(responses) => {
                assert_eq!(responses.sliders.get(&"grit".into()), Some(&5));
                assert_eq!(responses.scores.score(&"grit".into()), 15);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_retreat_keeps_answers() {
        let mut flow = AssessmentFlow::new(bank());
        flow.select_option(1).unwrap();
        assert_eq!(flow.retreat(), Ok(FlowTransition::Question(0)));
        assert_eq!(flow.selection(), Some(1));
        assert_eq!(flow.retreat(), Ok(FlowTransition::ExitToLanding));
    }

    #[test]
    fn test_reanswer_overwrites() {
        let mut flow = AssessmentFlow::new(bank());
        flow.select_option(1).unwrap();
        flow.retreat().unwrap();
        flow.select_option(0).unwrap();
        flow.retreat().unwrap();
        assert_eq!(flow.selection(), Some(0));
    }

    #[test]
    fn test_wrong_kind_and_range_errors() {
        let mut flow = AssessmentFlow::new(bank());
        assert_eq!(flow.set_slider(3), Err(FlowError::NotAScale("team".into())));
        assert!(matches!(
            flow.select_option(9),
            Err(FlowError::OptionOutOfRange { index: 9, len: 2, .. })
        ));
        flow.select_option(0).unwrap();
        assert_eq!(flow.select_option(0), Err(FlowError::NotAChoice("grit".into())));
        assert!(matches!(
            flow.set_slider(11),
            Err(FlowError::ValueOutOfRange { value: 11, .. })
        ));
    }

    #[test]
    fn test_finished_flow_is_frozen() {
        let mut flow = AssessmentFlow::new(bank());
        flow.select_option(0).unwrap();
        flow.advance().unwrap();
        assert_eq!(flow.set_slider(2), Err(FlowError::Finished));
        assert_eq!(flow.retreat(), Err(FlowError::Finished));
        assert_eq!(flow.advance(), Err(FlowError::Finished));
    }
}
