//! Notification configuration from TOML (`[notification]` section)

use blueprint_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default Resend endpoint.
pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Default sender for Resend mail.
pub const DEFAULT_FROM: &str = "Breakaway Blueprint <onboarding@resend.dev>";

/// Which adapter delivers lead notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationProvider {
    /// POST the JSON payload to an endpoint
    #[default]
    Webhook,
    /// Render the mail and send it through the Resend API
    Resend,
}

impl NotificationProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationProvider::Webhook => "webhook",
            NotificationProvider::Resend => "resend",
        }
    }
}

impl FromStr for NotificationProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "webhook" | "http" => Ok(NotificationProvider::Webhook),
            "resend" | "email" => Ok(NotificationProvider::Resend),
            other => Err(format!("unknown notification provider '{}'", other)),
        }
    }
}

/// Raw notification configuration from TOML
///
/// # Example
///
/// ```toml
/// [notification]
/// enabled = true
/// provider = "resend"                  # "webhook" or "resend"
/// api_key = "re_..."
/// recipient = "advisors@example.com"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNotificationConfig {
    /// Send a notification when a lead is captured
    pub enabled: bool,
    /// Provider name: "webhook" or "resend"
    pub provider: String,
    /// Target URL (required for webhook; Resend has a default)
    pub endpoint: Option<String>,
    /// Bearer token (optional for webhook, required for Resend)
    pub api_key: Option<String>,
    /// Mail recipient (Resend only)
    pub recipient: Option<String>,
    /// Mail sender (Resend only)
    pub from: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileNotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: "webhook".to_string(),
            endpoint: None,
            api_key: None,
            recipient: None,
            from: None,
            timeout_secs: 10,
        }
    }
}

impl FileNotificationConfig {
    /// Parse the provider name. Unknown names fall back to webhook.
    pub fn parse_provider(&self) -> (NotificationProvider, Vec<ConfigIssue>) {
        match self.provider.parse::<NotificationProvider>() {
            Ok(provider) => (provider, vec![]),
            Err(_) => {
                let code = ConfigIssueCode::InvalidEnumValue {
                    field: "notification.provider".to_string(),
                    value: self.provider.clone(),
                    valid_values: vec!["webhook".to_string(), "resend".to_string()],
                };
                let message = format!(
                    "notification.provider: unknown value '{}', falling back to 'webhook'",
                    self.provider
                );
                let issue = if self.enabled {
                    ConfigIssue::error(code, message)
                } else {
                    ConfigIssue::warning(code, message)
                };
                (NotificationProvider::default(), vec![issue])
            }
        }
    }

    /// Endpoint to call, with the provider default applied.
    pub fn resolved_endpoint(&self, provider: NotificationProvider) -> Option<String> {
        match (provider, &self.endpoint) {
            (_, Some(endpoint)) => Some(endpoint.clone()),
            (NotificationProvider::Resend, None) => Some(RESEND_ENDPOINT.to_string()),
            (NotificationProvider::Webhook, None) => None,
        }
    }

    /// Sender with the default applied.
    pub fn resolved_from(&self) -> String {
        self.from.clone().unwrap_or_else(|| DEFAULT_FROM.to_string())
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        let (provider, mut issues) = self.parse_provider();
        if !self.enabled {
            return issues;
        }

        let missing = |field: &str| {
            ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: format!("notification.{}", field),
                },
                format!(
                    "notification.{} is required when the {} provider is enabled",
                    field,
                    provider.as_str()
                ),
            )
        };

        match provider {
            NotificationProvider::Webhook => {
                if self.endpoint.is_none() {
                    issues.push(missing("endpoint"));
                }
            }
            NotificationProvider::Resend => {
                if self.api_key.is_none() {
                    issues.push(missing("api_key"));
                }
                if self.recipient.is_none() {
                    issues.push(missing("recipient"));
                }
            }
        }

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "notification.timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                "notification.timeout_secs cannot be 0",
            ));
        }

        issues
    }
}
