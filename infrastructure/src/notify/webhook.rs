//! Webhook notifier: posts the lead payload as JSON.

use super::{http_client, post_json};
use async_trait::async_trait;
use blueprint_application::{LeadNotifier, NotifyError};
use blueprint_domain::LeadNotification;
use std::time::Duration;
use tracing::debug;

/// Posts `LeadNotification` JSON to a fixed endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl WebhookNotifier {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint.into(),
            api_key,
        })
    }
}

#[async_trait]
impl LeadNotifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, notification: &LeadNotification) -> Result<(), NotifyError> {
        debug!("POST {} for {}", self.endpoint, notification.email);
        post_json(
            &self.client,
            &self.endpoint,
            self.api_key.as_deref(),
            notification,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn notification() -> LeadNotification {
        LeadNotification {
            name: "Ava Chen".to_string(),
            email: "ava@chenadvisory.com".to_string(),
            phone: "—".to_string(),
            firm: "Chen Advisory".to_string(),
            score: "64/100".to_string(),
            tier: "Moderate Readiness".to_string(),
            answers: "SCORE: 64/100 (Moderate Readiness)".to_string(),
        }
    }

    #[tokio::test]
    async fn test_posts_payload_with_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/lead")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::PartialJson(json!({
                "name": "Ava Chen",
                "score": "64/100",
                "tier": "Moderate Readiness",
                "phone": "—",
            })))
            .with_status(200)
            .create_async()
            .await;

        let notifier = WebhookNotifier::new(
            format!("{}/lead", server.url()),
            Some("secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        notifier.send(&notification()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/lead")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let notifier =
            WebhookNotifier::new(format!("{}/lead", server.url()), None, Duration::from_secs(5))
                .unwrap();
        let err = notifier.send(&notification()).await.unwrap_err();
        match err {
            NotifyError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_failure() {
        let notifier =
            WebhookNotifier::new("http://127.0.0.1:9/lead", None, Duration::from_secs(2)).unwrap();
        let err = notifier.send(&notification()).await.unwrap_err();
        assert!(matches!(
            err,
            NotifyError::RequestFailed(_) | NotifyError::Timeout
        ));
    }
}
