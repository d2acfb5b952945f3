//! Complete assessment use case
//!
//! Commits the finished responses to the session and decides which screen
//! follows the assessment.

use crate::config::FlowParams;
use crate::flow::Step;
use crate::session::{FlowToken, SessionError, SessionStore};
use blueprint_domain::Responses;
use tracing::info;

/// Finishes the assessment step.
pub struct CompleteAssessmentUseCase {
    params: FlowParams,
}

impl CompleteAssessmentUseCase {
    pub fn new(params: FlowParams) -> Self {
        Self { params }
    }

    /// Store `responses` and return the next screen.
    ///
    /// Nothing is written when the token is stale.
    pub fn execute(
        &self,
        session: &mut SessionStore,
        token: FlowToken,
        responses: &Responses,
    ) -> Result<Step, SessionError> {
        session.commit_responses(token, responses)?;
        let next = if self.params.require_gate {
            Step::Gate
        } else {
            Step::Capture
        };
        info!("Assessment completed ({} answers), continuing to {}", responses.scores.len(), next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::NavigationError;

    fn responses() -> Responses {
        let mut r = Responses::new();
        r.scores.insert("aum".into(), 3);
        r.selections.insert("aum".into(), 1);
        r
    }

    #[test]
    fn test_routes_through_gate_when_required() {
        let mut session = SessionStore::new();
        let token = session.token();
        let use_case = CompleteAssessmentUseCase::new(FlowParams::default());
        assert_eq!(use_case.execute(&mut session, token, &responses()).unwrap(), Step::Gate);
        assert!(session.has_responses(token));
    }

    #[test]
    fn test_skips_gate_when_disabled() {
        let mut session = SessionStore::new();
        let token = session.token();
        let use_case =
            CompleteAssessmentUseCase::new(FlowParams::default().with_require_gate(false));
        assert_eq!(
            use_case.execute(&mut session, token, &responses()).unwrap(),
            Step::Capture
        );
    }

    #[test]
    fn test_stale_token_is_rejected() {
        let mut session = SessionStore::new();
        let old = session.token();
        session.restart();
        let use_case = CompleteAssessmentUseCase::new(FlowParams::default());
        let err = use_case.execute(&mut session, old, &responses()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Navigation(NavigationError::StaleToken { .. })
        ));
    }
}
