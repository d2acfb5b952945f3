//! View results use case

use crate::config::FlowParams;
use crate::session::{FlowToken, NavigationError, SessionStore};
use blueprint_domain::{Lead, QuestionBank, ReadinessReport, Responses};
use std::sync::Arc;

/// Everything the results screen needs.
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub responses: Responses,
    pub report: ReadinessReport,
    pub lead: Option<Lead>,
}

/// Results step: scores the committed responses.
pub struct ViewResultsUseCase {
    bank: Arc<QuestionBank>,
    params: FlowParams,
}

impl ViewResultsUseCase {
    pub fn new(bank: Arc<QuestionBank>, params: FlowParams) -> Self {
        Self { bank, params }
    }

    pub fn execute(
        &self,
        session: &SessionStore,
        token: FlowToken,
    ) -> Result<ResultsView, NavigationError> {
        let responses = session.load_responses(token)?;
        let lead = session.load_lead(token)?;
        let report =
            ReadinessReport::evaluate(&self.bank, &responses.scores, self.params.weakest_count);
        Ok(ResultsView {
            responses,
            report,
            lead,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Step;
    use blueprint_domain::Tier;

    fn use_case() -> ViewResultsUseCase {
        ViewResultsUseCase::new(
            Arc::new(QuestionBank::standard().unwrap()),
            FlowParams::default(),
        )
    }

    #[test]
    fn test_results_require_responses() {
        let session = SessionStore::new();
        let err = use_case().execute(&session, session.token()).unwrap_err();
        assert_eq!(err.redirect(), Step::Assessment);
    }

    #[test]
    fn test_results_after_restart_redirect() {
        let mut session = SessionStore::new();
        let old = session.token();
        session.commit_responses(old, &Responses::new()).unwrap();
        let new = session.restart();
        assert!(use_case().execute(&session, old).is_err());
        assert!(use_case().execute(&session, new).is_err());
    }

    #[test]
    fn test_results_for_empty_answers() {
        let mut session = SessionStore::new();
        let token = session.token();
        session.commit_responses(token, &Responses::new()).unwrap();

        let view = use_case().execute(&session, token).unwrap();
        assert_eq!(view.report.total_percentage, 0);
        assert_eq!(view.report.tier(), Tier::NotYetReady);
        assert_eq!(view.report.weakest.len(), 3);
        assert!(view.lead.is_none());
    }
}
