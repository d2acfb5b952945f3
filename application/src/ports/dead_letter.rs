//! Port for notifications that could not be delivered.
//!
//! Failed dispatches are never retried; they are handed to a
//! [`DeadLetterSink`] so an operator can follow up by hand. Recording is
//! synchronous and infallible from the caller's point of view.

use blueprint_domain::LeadNotification;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

/// A notification that failed, with the reason and the failure time.
#[derive(Debug, Clone, Serialize)]
pub struct DeadLetter {
    pub notifier: String,
    pub error: String,
    pub failed_at: DateTime<Utc>,
    pub notification: LeadNotification,
}

impl DeadLetter {
    pub fn new(notifier: impl Into<String>, error: impl Into<String>, notification: LeadNotification) -> Self {
        Self {
            notifier: notifier.into(),
            error: error.into(),
            failed_at: Utc::now(),
            notification,
        }
    }
}

/// Destination for undeliverable notifications.
pub trait DeadLetterSink: Send + Sync {
    /// Record a failed notification. Failures to record are ignored.
    fn record(&self, letter: DeadLetter);
}

/// Sink that only writes a tracing warning.
pub struct LogDeadLetters;

impl DeadLetterSink for LogDeadLetters {
    fn record(&self, letter: DeadLetter) {
        warn!(
            notifier = %letter.notifier,
            email = %letter.notification.email,
            "Undelivered lead notification: {}",
            letter.error
        );
    }
}
