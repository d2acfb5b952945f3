//! Screen flow: the ordered steps and the question-by-question assessment.

pub mod assessment;
pub mod step;

pub use assessment::{AssessmentFlow, FlowError, FlowTransition};
pub use step::Step;
