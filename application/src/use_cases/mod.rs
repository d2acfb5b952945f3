//! Use cases
//!
//! One use case per screen after the assessment. Each takes the
//! [`SessionStore`](crate::session::SessionStore) and the caller's
//! [`FlowToken`](crate::session::FlowToken) and redirects on missing state.

pub mod capture_lead;
pub mod complete_assessment;
pub mod payment_gate;
pub mod view_results;
