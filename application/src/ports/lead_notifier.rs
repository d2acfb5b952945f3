//! Lead notifier port
//!
//! Defines how a captured lead is delivered to the outside world (a mail
//! webhook, a transactional mail API, ...). Adapters live in the
//! infrastructure layer.

use async_trait::async_trait;
use blueprint_domain::LeadNotification;
use thiserror::Error;

/// Errors a notifier can report. None of them reach the user.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notifier not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Timeout")]
    Timeout,
}

/// Delivers one lead notification.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    /// Short adapter name for logs (e.g. `"webhook"`).
    fn name(&self) -> &str;

    /// Send the notification. `Ok` means the receiver answered with 2xx.
    async fn send(&self, notification: &LeadNotification) -> Result<(), NotifyError>;
}

