//! Fire-and-forget lead notification dispatch.
//!
//! [`NotificationDispatcher::dispatch`] spawns one task per notification and
//! returns immediately. The flow never waits on the result; the returned
//! [`DispatchHandle`] exists so a process about to exit can give the task a
//! bounded grace period.

use crate::ports::dead_letter::{DeadLetter, DeadLetterSink};
use crate::ports::lead_notifier::LeadNotifier;
use blueprint_domain::LeadNotification;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// How a dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    /// Delivery failed and the notification went to the dead-letter sink.
    Failed(String),
    /// No runtime was available to run the task.
    Skipped,
    /// The caller stopped waiting before the task finished.
    TimedOut,
}

/// Handle to a spawned dispatch task. Dropping it does not cancel the task.
pub struct DispatchHandle {
    task: Option<JoinHandle<DispatchOutcome>>,
}

impl DispatchHandle {
    fn skipped() -> Self {
        Self { task: None }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait up to `timeout` for the task to finish.
    pub async fn settle(self, timeout: Duration) -> DispatchOutcome {
        let Some(task) = self.task else {
            return DispatchOutcome::Skipped;
        };
        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => DispatchOutcome::Failed(format!("dispatch task aborted: {}", e)),
            Err(_) => DispatchOutcome::TimedOut,
        }
    }
}

/// Sends lead notifications in the background.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn LeadNotifier>,
    dead_letters: Arc<dyn DeadLetterSink>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn LeadNotifier>, dead_letters: Arc<dyn DeadLetterSink>) -> Self {
        Self {
            notifier,
            dead_letters,
        }
    }

    pub fn notifier_name(&self) -> &str {
        self.notifier.name()
    }

    /// Start delivering `notification` and return at once.
    ///
    /// Without a tokio runtime the notification is dead-lettered instead.
    pub fn dispatch(&self, notification: LeadNotification) -> DispatchHandle {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime; notification for {} not sent", notification.email);
            self.dead_letters.record(DeadLetter::new(
                self.notifier.name(),
                "no async runtime available",
                notification,
            ));
            return DispatchHandle::skipped();
        };

        let notifier = Arc::clone(&self.notifier);
        let dead_letters = Arc::clone(&self.dead_letters);
        let task = runtime.spawn(async move {
            match notifier.send(&notification).await {
                Ok(()) => {
                    info!(notifier = notifier.name(), "Lead notification delivered");
                    DispatchOutcome::Delivered
                }
                Err(e) => {
                    let error = e.to_string();
                    warn!(notifier = notifier.name(), "Lead notification failed: {}", error);
                    dead_letters.record(DeadLetter::new(notifier.name(), error.clone(), notification));
                    DispatchOutcome::Failed(error)
                }
            }
        });

        DispatchHandle { task: Some(task) }
    }
}
