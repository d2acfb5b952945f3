//! Screen-by-screen terminal walkthrough of the assessment

use super::input::LineSource;
use crate::progress::reporter::AssessmentProgress;
use blueprint_application::{
    AssessmentFlow, CaptureLeadError, CaptureLeadUseCase, CompleteAssessmentUseCase,
    DispatchHandle, FlowError, FlowParams, FlowToken, FlowTransition, NavigationError,
    NotificationDispatcher, PaymentGate, ResultsView, SessionError, SessionStore, Step,
    ViewResultsUseCase,
};
use blueprint_domain::{LeadForm, QuestionBank, QuestionKind};
use colored::Colorize;
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that end the interactive session early.
#[derive(Error, Debug)]
pub enum InteractiveError {
    #[error("Failed to read input: {0}")]
    Input(#[source] io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Capture(CaptureLeadError),
}

/// How the session ended.
pub enum InteractiveOutcome {
    /// The results screen was reached.
    Completed {
        view: ResultsView,
        /// Notification still in flight, if one was sent.
        dispatch: Option<DispatchHandle>,
    },
    /// The user left before the results screen.
    Quit,
}

/// Outcome of handling one line on a screen.
enum Next {
    Stay,
    Goto(Step),
    Quit,
}

/// Drives the landing, assessment, gate, capture and results screens over a
/// line-oriented terminal.
pub struct InteractiveSession<S: LineSource, W: Write> {
    bank: Arc<QuestionBank>,
    session: SessionStore,
    token: FlowToken,
    flow: AssessmentFlow,
    complete: CompleteAssessmentUseCase,
    capture: CaptureLeadUseCase,
    results: ViewResultsUseCase,
    progress: AssessmentProgress,
    dispatch: Option<DispatchHandle>,
    input: S,
    out: W,
}

impl<S: LineSource, W: Write> InteractiveSession<S, W> {
    pub fn new(bank: Arc<QuestionBank>, params: FlowParams, input: S, out: W) -> Self {
        let session = SessionStore::new();
        Self {
            token: session.token(),
            session,
            flow: AssessmentFlow::new(Arc::clone(&bank)),
            complete: CompleteAssessmentUseCase::new(params.clone()),
            capture: CaptureLeadUseCase::new(Arc::clone(&bank), params.clone()),
            results: ViewResultsUseCase::new(Arc::clone(&bank), params),
            progress: AssessmentProgress::default(),
            dispatch: None,
            bank,
            input,
            out,
        }
    }

    /// Send a notification for every captured lead.
    pub fn with_dispatcher(mut self, dispatcher: NotificationDispatcher) -> Self {
        self.capture = self.capture.with_dispatcher(dispatcher);
        self
    }

    pub fn with_progress(mut self, progress: AssessmentProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Run from the landing screen until results are shown or the user quits.
    pub fn run(&mut self) -> Result<InteractiveOutcome, InteractiveError> {
        let mut step = Step::Landing;
        loop {
            debug!("Entering {}", step);
            let next = match step {
                Step::Landing => self.landing()?,
                Step::Assessment => self.assessment()?,
                Step::Gate => self.gate()?,
                Step::Capture => self.capture()?,
                Step::Results => match self.results.execute(&self.session, self.token) {
                    Ok(view) => {
                        return Ok(InteractiveOutcome::Completed {
                            view,
                            dispatch: self.dispatch.take(),
                        });
                    }
                    Err(e) => self.redirect(&e)?,
                },
            };

            match next {
                Next::Stay => {}
                Next::Goto(target) => {
                    if target == Step::Assessment && self.flow.is_finished() {
                        self.begin();
                    }
                    step = target;
                }
                Next::Quit => {
                    info!("Interactive session ended before results");
                    return Ok(InteractiveOutcome::Quit);
                }
            }
        }
    }

    /// Start a fresh run: new token, empty answers.
    fn begin(&mut self) {
        self.token = self.session.restart();
        self.flow = AssessmentFlow::new(Arc::clone(&self.bank));
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>, InteractiveError> {
        let line = self.input.read_line(prompt).map_err(InteractiveError::Input)?;
        Ok(line.map(|line| line.trim().to_string()))
    }

    fn redirect(&mut self, err: &NavigationError) -> Result<Next, InteractiveError> {
        writeln!(self.out, "{}", err.to_string().yellow())?;
        Ok(Next::Goto(err.redirect()))
    }

    fn landing(&mut self) -> Result<Next, InteractiveError> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "Breakaway Blueprint".bold().cyan())?;
        writeln!(
            self.out,
            "{} questions on whether your practice is ready to go independent.",
            self.bank.len()
        )?;
        writeln!(self.out)?;
        match self.prompt("Press Enter to start (q to quit) ")?.as_deref() {
            None | Some("q") => Ok(Next::Quit),
            Some(_) => {
                if self.flow.is_finished() {
                    self.begin();
                }
                Ok(Next::Goto(Step::Assessment))
            }
        }
    }

    fn render_question(&mut self) -> Result<(), InteractiveError> {
        let question = self.flow.current().clone();
        let section = self
            .bank
            .section(&question.section)
            .map(|s| s.label.clone())
            .unwrap_or_default();
        self.progress.show(
            self.flow.position() + 1,
            self.flow.total(),
            self.flow.progress_percent(),
            &section,
        );

        writeln!(self.out)?;
        writeln!(self.out, "{}", question.text.bold())?;
        if let Some(ref subtitle) = question.subtitle {
            writeln!(self.out, "{}", subtitle.dimmed())?;
        }
        match &question.kind {
            QuestionKind::Choice { options } => {
                let selected = self.flow.selection();
                for (i, option) in options.iter().enumerate() {
                    let marker = if selected == Some(i) { "*" } else { " " };
                    writeln!(self.out, " {} {}) {}", marker, i + 1, option.label)?;
                }
            }
            QuestionKind::Scale { min, max, .. } => {
                let current = self.flow.slider_position().unwrap_or(*min);
                writeln!(self.out, "  Scale {}..{} (currently {})", min, max, current)?;
            }
        }
        Ok(())
    }

    fn assessment(&mut self) -> Result<Next, InteractiveError> {
        self.render_question()?;
        let prompt = match self.flow.current().kind {
            QuestionKind::Choice { .. } => "Choose an option (b back, q quit) > ",
            QuestionKind::Scale { .. } => "Enter a value, or Enter to keep it (b back, q quit) > ",
        };
        let Some(line) = self.prompt(prompt)? else {
            return Ok(Next::Quit);
        };

        let result = match line.as_str() {
            "q" => return Ok(Next::Quit),
            "b" => self.flow.retreat(),
            "" => self.flow.advance(),
            other => match other.parse::<u32>() {
                Ok(value) if self.flow.current().kind.is_choice() => match value.checked_sub(1) {
                    Some(index) => self.flow.select_option(index as usize),
                    None => {
                        writeln!(self.out, "{}", "Options are numbered from 1".yellow())?;
                        return Ok(Next::Stay);
                    }
                },
                Ok(value) => self.flow.set_slider(value).and_then(|()| self.flow.advance()),
                Err(_) => {
                    writeln!(self.out, "{}", format!("Not a number: {}", other).yellow())?;
                    return Ok(Next::Stay);
                }
            },
        };

        match result {
            Ok(FlowTransition::Question(_)) => Ok(Next::Stay),
            Ok(FlowTransition::ExitToLanding) => Ok(Next::Goto(Step::Landing)),
            Ok(FlowTransition::Completed(responses)) => {
                let next = self
                    .complete
                    .execute(&mut self.session, self.token, &responses)?;
                Ok(Next::Goto(next))
            }
            Err(FlowError::OptionOutOfRange { len, .. }) => {
                let message = format!("Choose an option from 1 to {}", len);
                writeln!(self.out, "{}", message.yellow())?;
                Ok(Next::Stay)
            }
            Err(e) => {
                writeln!(self.out, "{}", e.to_string().yellow())?;
                Ok(Next::Stay)
            }
        }
    }

    fn gate(&mut self) -> Result<Next, InteractiveError> {
        if let Err(e) = PaymentGate::enter(&self.session, self.token) {
            return self.redirect(&e);
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", "Unlock your full readiness report".bold())?;
        writeln!(self.out, "Payment is not collected in this version.")?;
        if matches!(self.prompt("Press Enter to continue (q to quit) ")?.as_deref(), None | Some("q")) {
            return Ok(Next::Quit);
        }
        match PaymentGate::proceed(&self.session, self.token) {
            Ok(next) => Ok(Next::Goto(next)),
            Err(e) => self.redirect(&e),
        }
    }

    fn capture(&mut self) -> Result<Next, InteractiveError> {
        if let Err(e) = self.capture.enter(&self.session, self.token) {
            return self.redirect(&e);
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", "Where should we send your report?".bold())?;

        let mut form = LeadForm::default();
        for (field, prompt) in [
            (&mut form.name, "Name: "),
            (&mut form.email, "Email: "),
            (&mut form.phone, "Phone (optional): "),
            (&mut form.firm, "Firm (optional): "),
        ] {
            match self.input.read_line(prompt).map_err(InteractiveError::Input)? {
                Some(value) => *field = value,
                None => return Ok(Next::Quit),
            }
        }

        match self.capture.submit(&mut self.session, self.token, &form) {
            Ok(outcome) => {
                self.dispatch = outcome.dispatch;
                Ok(Next::Goto(outcome.next))
            }
            Err(CaptureLeadError::Validation(errors)) => {
                for error in errors.errors() {
                    writeln!(
                        self.out,
                        "  {} {}",
                        format!("{}:", error.field.as_str()).red(),
                        error.message
                    )?;
                }
                Ok(Next::Stay)
            }
            Err(e) => match e.redirect() {
                Some(target) => {
                    writeln!(self.out, "{}", e.to_string().yellow())?;
                    Ok(Next::Goto(target))
                }
                None => Err(InteractiveError::Capture(e)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_domain::{ChoiceOption, Question, Recommendations, Section};
    use std::collections::{BTreeMap, VecDeque};

    struct Scripted {
        lines: VecDeque<&'static str>,
    }

    impl Scripted {
        fn new(lines: &[&'static str]) -> Self {
            Self {
                lines: lines.iter().copied().collect(),
            }
        }
    }

    impl LineSource for Scripted {
        fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
            Ok(self.lines.pop_front().map(str::to_string))
        }
    }

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

    fn session(
        params: FlowParams,
        lines: &[&'static str],
    ) -> InteractiveSession<Scripted, Vec<u8>> {
        InteractiveSession::new(bank(), params, Scripted::new(lines), Vec::new())
            .with_progress(AssessmentProgress::new(false))
    }

    fn output(session: &InteractiveSession<Scripted, Vec<u8>>) -> String {
        String::from_utf8_lossy(&session.out).into_owned()
    }

    #[test]
    fn test_full_walkthrough_reaches_results() {
        let mut s = session(
            FlowParams::default(),
            &["", "2", "7", "", "Ava Chen", "ava@chenadvisory.com", "", ""],
        );
        match s.run().unwrap() {
            InteractiveOutcome::Completed { view, dispatch } => {
                assert!(dispatch.is_none());
                assert_eq!(view.responses.selections.get(&"team".into()), Some(&1));
                assert_eq!(view.responses.sliders.get(&"grit".into()), Some(&7));
                // 26 of 35 points
                assert_eq!(view.report.total_percentage, 74);
                let lead = view.lead.unwrap();
                assert_eq!(lead.email(), "ava@chenadvisory.com");
            }
            InteractiveOutcome::Quit => panic!("expected results"),
        }
        let out = output(&s);
        assert!(out.contains("Team size?"));
        assert!(out.contains("Unlock your full readiness report"));
    }

    #[test]
    fn test_gate_skipped_when_not_required() {
        let mut s = session(
            FlowParams::default().with_require_gate(false),
            &["", "1", "", "Ava Chen", "ava@chenadvisory.com", "", ""],
        );
        assert!(matches!(s.run().unwrap(), InteractiveOutcome::Completed { .. }));
        assert!(!output(&s).contains("Unlock your full readiness report"));
    }

    #[test]
    fn test_invalid_lead_reprompts() {
        let mut s = session(
            FlowParams::default().with_require_gate(false),
            &[
                "", "1", "",
                "Ava", "not-an-email", "", "",
                "Ava Chen", "ava@chenadvisory.com", "", "",
            ],
        );
        match s.run().unwrap() {
            InteractiveOutcome::Completed { view, .. } => {
                assert_eq!(view.lead.unwrap().name(), "Ava Chen");
            }
            InteractiveOutcome::Quit => panic!("expected results"),
        }
        assert!(output(&s).contains("Invalid email"));
    }

    #[test]
    fn test_unanswered_choice_and_bad_input_stay_put() {
        let mut s = session(FlowParams::default(), &["", "", "zero", "0", "9", "q"]);
        assert!(matches!(s.run().unwrap(), InteractiveOutcome::Quit));
        let out = output(&s);
        assert!(out.contains("must be answered"));
        assert!(out.contains("Not a number: zero"));
        assert!(out.contains("numbered from 1"));
        assert!(out.contains("Choose an option from 1 to 2"));
    }

    #[test]
    fn test_back_from_first_question_returns_to_landing() {
        let mut s = session(FlowParams::default(), &["", "b", "q"]);
        assert!(matches!(s.run().unwrap(), InteractiveOutcome::Quit));
        assert_eq!(output(&s).matches("Breakaway Blueprint").count(), 2);
    }

    #[test]
    fn test_landing_resumes_unfinished_answers() {
        let mut s = session(FlowParams::default(), &["", "2", "b", "b", "", "q"]);
        assert!(matches!(s.run().unwrap(), InteractiveOutcome::Quit));
        assert_eq!(s.flow.selection(), Some(1));
    }

    #[test]
    fn test_out_of_range_slider_is_rejected() {
        let mut s = session(FlowParams::default(), &["", "1", "11", "q"]);
        assert!(matches!(s.run().unwrap(), InteractiveOutcome::Quit));
        assert!(output(&s).contains("outside 1..=10"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut s = session(FlowParams::default(), &["", "2"]);
        assert!(matches!(s.run().unwrap(), InteractiveOutcome::Quit));
    }
}
