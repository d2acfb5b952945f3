//! Application layer for breakaway-blueprint
//!
//! This crate contains the assessment flow, the session store, the
//! notification dispatcher, use cases and port definitions.
//! It depends only on the domain layer.

pub mod config;
pub mod dispatch;
pub mod flow;
pub mod ports;
pub mod session;
pub mod use_cases;

// Re-export commonly used types
pub use config::FlowParams;
pub use dispatch::{DispatchHandle, DispatchOutcome, NotificationDispatcher};
pub use flow::{AssessmentFlow, FlowError, FlowTransition, Step};
pub use ports::{
    dead_letter::{DeadLetter, DeadLetterSink, LogDeadLetters},
    lead_notifier::{LeadNotifier, NotifyError},
};
pub use session::{FlowToken, NavigationError, SessionError, SessionStore};
pub use use_cases::capture_lead::{CaptureLeadError, CaptureLeadUseCase, CaptureOutcome};
pub use use_cases::complete_assessment::CompleteAssessmentUseCase;
pub use use_cases::payment_gate::PaymentGate;
pub use use_cases::view_results::{ResultsView, ViewResultsUseCase};
