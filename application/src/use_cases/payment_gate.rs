//! Payment gate use case
//!
//! The gate has no payment integration: entering only checks that the
//! assessment was completed, and proceeding always leads to lead capture.

use crate::flow::Step;
use crate::session::{FlowToken, NavigationError, SessionStore};
use tracing::debug;

/// Stubbed payment step between the assessment and lead capture.
pub struct PaymentGate;

impl PaymentGate {
    /// Check the caller may see the gate.
    pub fn enter(session: &SessionStore, token: FlowToken) -> Result<(), NavigationError> {
        session.load_responses(token).map(|_| ())
    }

    /// Leave the gate. Always allowed once the gate was reachable.
    pub fn proceed(session: &SessionStore, token: FlowToken) -> Result<Step, NavigationError> {
        Self::enter(session, token)?;
        debug!("Payment gate bypassed");
        Ok(Step::Capture)
    }
}
