//! Capture lead use case
//!
//! Validates the lead form, stores the lead and fires the notification.
//! The notification is dispatched in the background and its outcome never
//! affects the flow: a valid submission always moves on to the results.

use crate::config::FlowParams;
use crate::dispatch::{DispatchHandle, NotificationDispatcher};
use crate::flow::Step;
use crate::session::{FlowToken, NavigationError, SessionError, SessionStore};
use blueprint_domain::{
    Lead, LeadForm, LeadNotification, LeadValidationErrors, QuestionBank, ReadinessReport,
    Responses,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors from the capture step.
#[derive(Error, Debug)]
pub enum CaptureLeadError {
    /// The form has field-level errors; the flow stays on the capture screen.
    #[error(transparent)]
    Validation(#[from] LeadValidationErrors),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl CaptureLeadError {
    /// Screen to redirect to, if the error is a navigation failure.
    pub fn redirect(&self) -> Option<Step> {
        match self {
            CaptureLeadError::Navigation(e) => Some(e.redirect()),
            CaptureLeadError::Session(SessionError::Navigation(e)) => Some(e.redirect()),
            _ => None,
        }
    }
}

/// Result of a valid submission.
pub struct CaptureOutcome {
    pub next: Step,
    pub lead: Lead,
    /// Background notification task, when notifications are enabled.
    pub dispatch: Option<DispatchHandle>,
}

/// Lead capture step.
pub struct CaptureLeadUseCase {
    bank: Arc<QuestionBank>,
    params: FlowParams,
    dispatcher: Option<NotificationDispatcher>,
}

impl CaptureLeadUseCase {
    pub fn new(bank: Arc<QuestionBank>, params: FlowParams) -> Self {
        Self {
            bank,
            params,
            dispatcher: None,
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: NotificationDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Check the caller may see the capture form.
    pub fn enter(&self, session: &SessionStore, token: FlowToken) -> Result<(), NavigationError> {
        session.load_responses(token).map(|_| ())
    }

    /// Validate and store the lead, then notify without waiting.
    pub fn submit(
        &self,
        session: &mut SessionStore,
        token: FlowToken,
        form: &LeadForm,
    ) -> Result<CaptureOutcome, CaptureLeadError> {
        let responses = session.load_responses(token)?;
        let lead = Lead::parse(form)?;
        session.store_lead(token, &lead)?;
        info!("Lead captured for {}", lead.email());

        let dispatch = self
            .dispatcher
            .as_ref()
            .map(|dispatcher| dispatcher.dispatch(self.notification(&lead, &responses)));

        Ok(CaptureOutcome {
            next: Step::Results,
            lead,
            dispatch,
        })
    }

    fn notification(&self, lead: &Lead, responses: &Responses) -> LeadNotification {
        let report =
            ReadinessReport::evaluate(&self.bank, &responses.scores, self.params.weakest_count);
        LeadNotification::new(lead, &self.bank, responses, &report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchOutcome;
    use crate::ports::dead_letter::{DeadLetter, DeadLetterSink};
    use crate::ports::lead_notifier::{LeadNotifier, NotifyError};
    use async_trait::async_trait;
    use blueprint_domain::LeadField;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<LeadNotification>>,
        fail: bool,
    }

    #[async_trait]
    impl LeadNotifier for RecordingNotifier {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(&self, notification: &LeadNotification) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(notification.clone());
            if self.fail {
                Err(NotifyError::Timeout)
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct CountingSink(Mutex<usize>);

    impl DeadLetterSink for CountingSink {
        fn record(&self, _letter: DeadLetter) {
            *self.0.lock().unwrap() += 1;
        }
    }

    fn bank() -> Arc<QuestionBank> {
        Arc::new(QuestionBank::standard().unwrap())
    }

    fn form() -> LeadForm {
        LeadForm {
            name: "  Ava Chen ".to_string(),
            email: "ava@chenadvisory.com".to_string(),
            phone: String::new(),
            firm: "Chen Advisory".to_string(),
        }
    }

    fn completed_session() -> (SessionStore, FlowToken) {
        let mut session = SessionStore::new();
        let token = session.token();
        let mut responses = Responses::new();
        responses.scores.insert("aum".into(), 5);
        responses.selections.insert("aum".into(), 4);
        session.commit_responses(token, &responses).unwrap();
        (session, token)
    }

    #[test]
    fn test_enter_without_responses_redirects() {
        let use_case = CaptureLeadUseCase::new(bank(), FlowParams::default());
        let session = SessionStore::new();
        let err = use_case.enter(&session, session.token()).unwrap_err();
        assert_eq!(err.redirect(), Step::Assessment);
    }

    #[test]
    fn test_invalid_form_does_not_advance() {
        let use_case = CaptureLeadUseCase::new(bank(), FlowParams::default());
        let (mut session, token) = completed_session();
        let bad = LeadForm {
            name: String::new(),
            email: "not-an-email".to_string(),
            ..Default::default()
        };

        let err = use_case.submit(&mut session, token, &bad).err().unwrap();
        match err {
            CaptureLeadError::Validation(errors) => {
                assert!(errors.message_for(LeadField::Name).is_some());
                assert!(errors.message_for(LeadField::Email).is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(session.load_lead(token).unwrap(), None);
    }

    #[test]
    fn test_submit_without_dispatcher_stores_lead() {
        let use_case = CaptureLeadUseCase::new(bank(), FlowParams::default());
        let (mut session, token) = completed_session();

        let outcome = use_case.submit(&mut session, token, &form()).unwrap();
        assert_eq!(outcome.next, Step::Results);
        assert!(outcome.dispatch.is_none());
        assert_eq!(outcome.lead.name(), "Ava Chen");
        assert_eq!(session.load_lead(token).unwrap(), Some(outcome.lead));
    }

    #[tokio::test]
    async fn test_submit_dispatches_notification() {
        let notifier = Arc::new(RecordingNotifier::default());
        let dispatcher =
            NotificationDispatcher::new(notifier.clone(), Arc::new(CountingSink::default()));
        let use_case =
            CaptureLeadUseCase::new(bank(), FlowParams::default()).with_dispatcher(dispatcher);
        let (mut session, token) = completed_session();

        let outcome = use_case.submit(&mut session, token, &form()).unwrap();
        let handle = outcome.dispatch.unwrap();
        assert_eq!(handle.settle(Duration::from_secs(1)).await, DispatchOutcome::Delivered);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].name, "Ava Chen");
        assert_eq!(sent[0].phone, "—");
        assert_eq!(sent[0].firm, "Chen Advisory");
        assert!(sent[0].answers.contains("SCORE: 5/100 (Not Yet Ready)"));
    }

    #[tokio::test]
    async fn test_failed_notification_still_reaches_results() {
        let notifier = Arc::new(RecordingNotifier {
            fail: true,
            ..Default::default()
        });
        let sink = Arc::new(CountingSink::default());
        let dispatcher = NotificationDispatcher::new(notifier, sink.clone());
        let use_case =
            CaptureLeadUseCase::new(bank(), FlowParams::default()).with_dispatcher(dispatcher);
        let (mut session, token) = completed_session();

        let outcome = use_case.submit(&mut session, token, &form()).unwrap();
        assert_eq!(outcome.next, Step::Results);
        let result = outcome.dispatch.unwrap().settle(Duration::from_secs(1)).await;
        assert!(matches!(result, DispatchOutcome::Failed(_)));
        assert_eq!(*sink.0.lock().unwrap(), 1);
    }
}
