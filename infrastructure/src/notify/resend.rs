//! Resend notifier: renders the lead mail and sends it through the
//! Resend HTTP API.

use super::{http_client, post_json};
use async_trait::async_trait;
use blueprint_application::{LeadNotifier, NotifyError};
use blueprint_domain::LeadNotification;
use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;
use tracing::debug;

const CELL: &str = "padding:8px;border:1px solid #ddd;";

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
}

/// Sends one mail per lead to a fixed recipient.
pub struct ResendNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
    recipient: String,
}

impl ResendNotifier {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        recipient: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            from: from.into(),
            recipient: recipient.into(),
        })
    }
}

#[async_trait]
impl LeadNotifier for ResendNotifier {
    fn name(&self) -> &str {
        "resend"
    }

    async fn send(&self, notification: &LeadNotification) -> Result<(), NotifyError> {
        let email = ResendEmail {
            from: &self.from,
            to: [self.recipient.as_str()],
            subject: notification.subject(),
            html: render_html(notification),
        };
        debug!("Sending lead mail for {} to {}", notification.email, self.recipient);
        post_json(&self.client, &self.endpoint, Some(&self.api_key), &email).await
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Mail body: a table of lead fields followed by the transcript.
///
/// Every interpolated value is HTML-escaped.
pub fn render_html(notification: &LeadNotification) -> String {
    let rows = [
        ("Name", &notification.name),
        ("Email", &notification.email),
        ("Phone", &notification.phone),
        ("Firm", &notification.firm),
        ("Score", &notification.score),
        ("Tier", &notification.tier),
    ];

    let mut html = String::from("<h2>New Breakaway Blueprint™ Assessment Submission</h2>\n");
    html.push_str("<table style=\"border-collapse:collapse;width:100%;max-width:600px;\">\n");
    for (label, value) in rows {
        // Writing to a String cannot fail.
        let _ = writeln!(
            html,
            "<tr><td style=\"{CELL}font-weight:bold;\">{}</td><td style=\"{CELL}\">{}</td></tr>",
            label,
            escape_html(value)
        );
    }
    html.push_str("</table>\n");
    html.push_str("<h3 style=\"margin-top:20px;\">Full Answers</h3>\n");
    let _ = writeln!(
        html,
        "<pre style=\"background:#f5f5f5;padding:16px;border-radius:8px;font-size:12px;white-space:pre-wrap;\">{}</pre>",
        escape_html(&notification.answers)
    );
    html
}
