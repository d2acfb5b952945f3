//! Lead notifier adapters
//!
//! - [`WebhookNotifier`] posts the JSON payload to any endpoint
//! - [`ResendNotifier`] renders the HTML mail and sends it through Resend

mod resend;
mod webhook;

pub use resend::{ResendNotifier, render_html};
pub use webhook::WebhookNotifier;

use crate::config::{FileNotificationConfig, NotificationProvider};
use blueprint_application::{LeadNotifier, NotifyError};
use blueprint_domain::util::truncate_label;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Longest error body kept from a failed response.
const MAX_ERROR_BODY: usize = 500;

/// Build the configured notifier, or `None` when notifications are off.
pub fn build_notifier(
    config: &FileNotificationConfig,
) -> Result<Option<Arc<dyn LeadNotifier>>, NotifyError> {
    if !config.enabled {
        return Ok(None);
    }

    let (provider, _) = config.parse_provider();
    let timeout = Duration::from_secs(config.timeout_secs);
    let endpoint = config.resolved_endpoint(provider).ok_or_else(|| {
        NotifyError::NotConfigured("notification.endpoint is not set".to_string())
    })?;

    let notifier: Arc<dyn LeadNotifier> = match provider {
        NotificationProvider::Webhook => Arc::new(WebhookNotifier::new(
            endpoint,
            config.api_key.clone(),
            timeout,
        )?),
        NotificationProvider::Resend => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                NotifyError::NotConfigured("notification.api_key is not set".to_string())
            })?;
            let recipient = config.recipient.clone().ok_or_else(|| {
                NotifyError::NotConfigured("notification.recipient is not set".to_string())
            })?;
            Arc::new(ResendNotifier::new(
                endpoint,
                api_key,
                config.resolved_from(),
                recipient,
                timeout,
            )?)
        }
    };
    debug!("Using {} notifier", notifier.name());
    Ok(Some(notifier))
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, NotifyError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("breakaway-blueprint/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| NotifyError::NotConfigured(format!("failed to build HTTP client: {}", e)))
}

/// POST `body` as JSON and require a 2xx answer.
async fn post_json<T: Serialize + ?Sized>(
    client: &reqwest::Client,
    endpoint: &str,
    bearer: Option<&str>,
    body: &T,
) -> Result<(), NotifyError> {
    let mut request = client.post(endpoint).json(body);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            NotifyError::Timeout
        } else {
            NotifyError::RequestFailed(e.to_string())
        }
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(NotifyError::Status {
        status: status.as_u16(),
        body: truncate_label(&body, MAX_ERROR_BODY),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_builds_nothing() {
        let config = FileNotificationConfig::default();
        assert!(build_notifier(&config).unwrap().is_none());
    }

    #[test]
    fn test_builds_configured_provider() {
        let mut config = FileNotificationConfig {
            enabled: true,
            endpoint: Some("https://hooks.example.com/lead".to_string()),
            ..Default::default()
        };
        let notifier = build_notifier(&config).unwrap().unwrap();
        assert_eq!(notifier.name(), "webhook");

        config.provider = "resend".to_string();
        config.api_key = Some("re_test".to_string());
        config.recipient = Some("advisors@example.com".to_string());
        let notifier = build_notifier(&config).unwrap().unwrap();
        assert_eq!(notifier.name(), "resend");
    }

    #[test]
    fn test_missing_settings_are_not_configured() {
        let config = FileNotificationConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(matches!(
            build_notifier(&config),
            Err(NotifyError::NotConfigured(_))
        ));

        let config = FileNotificationConfig {
            enabled: true,
            provider: "resend".to_string(),
            api_key: Some("re_test".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_notifier(&config),
            Err(NotifyError::NotConfigured(msg)) if msg.contains("recipient")
        ));
    }
}
