use super::notifier::{AlertEvent, AlertSink};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use url::Url;

const CONTENT_LIMIT: usize = 2000;
const TRUNCATION_SUFFIX: &str = "\n… (truncated)";

/// Posts alerts to a chat webhook that accepts `{"content": "..."}`
/// (Discord, and Slack-compatible relays).
pub(crate) struct ChatWebhookSink {
    webhook_url: Url,
    client: Client,
}

impl ChatWebhookSink {
    pub(crate) fn new(webhook_url: Url) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .map_err(|_| anyhow!("failed to build webhook http client"))?;

        Ok(Self {
            webhook_url,
            client,
        })
    }
}

pub(crate) fn format_content(event: &AlertEvent) -> String {
    let mut lines = vec![
        format!(
            "**{}** `{}` `{}` `{}`",
            event.service_name,
            event.environment,
            event.component,
            event.level.as_str()
        ),
        format!(
            "`{}` `{}`",
            event.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            event.target
        ),
    ];

    if let Some(message) = event.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        lines.push(format!("> {}", message));
    }

    for (key, value) in &event.fields {
        lines.push(format!("- `{}` = `{}`", key, value));
    }

    for span in event.spans.iter().filter(|s| !s.fields.is_empty()) {
        lines.push(format!("span `{}`:", span.name));
        for (key, value) in &span.fields {
            lines.push(format!("- `{}` = `{}`", key, value));
        }
    }

    truncate(lines.join("\n"))
}

fn truncate(content: String) -> String {
    if content.chars().count() <= CONTENT_LIMIT {
        return content;
    }

    let allowed = CONTENT_LIMIT.saturating_sub(TRUNCATION_SUFFIX.chars().count());
    let mut truncated: String = content.chars().take(allowed).collect();
    truncated.push_str(TRUNCATION_SUFFIX);
    truncated
}

#[async_trait]
impl AlertSink for ChatWebhookSink {
    async fn deliver(&self, event: &AlertEvent) -> Result<()> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&json!({ "content": format_content(event) }))
            .send()
            .await
            // reqwest errors embed the URL, which carries the webhook token.
            .map_err(|err| {
                if err.is_timeout() {
                    anyhow!("operator webhook request timed out")
                } else if err.is_connect() {
                    anyhow!("operator webhook connection failed")
                } else {
                    anyhow!("operator webhook request failed")
                }
            })?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(anyhow!(
            "operator webhook returned non-success status: {}",
            response.status()
        ))
    }

    fn sink_name(&self) -> &'static str {
        "chat_webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::notifier::SpanSummary;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;
    use tracing::Level;

    fn event() -> AlertEvent {
        AlertEvent {
            level: Level::ERROR,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap(),
            service_name: "iptv-shop".to_string(),
            environment: "production".to_string(),
            component: "backend".to_string(),
            target: "iptv_backend::usecases::orders".to_string(),
            message: Some("orders: subscription insert failed".to_string()),
            fields: BTreeMap::from([("user_id".to_string(), "guest".to_string())]),
            spans: vec![SpanSummary {
                name: "request".to_string(),
                fields: BTreeMap::from([("uri".to_string(), "/api/subscribe".to_string())]),
            }],
        }
    }

    #[test]
    fn content_lists_header_message_fields_and_spans() {
        let content = format_content(&event());
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "**iptv-shop** `production` `backend` `ERROR`");
        assert_eq!(
            lines[1],
            "`2025-06-01T08:30:00Z` `iptv_backend::usecases::orders`"
        );
        assert_eq!(lines[2], "> orders: subscription insert failed");
        assert_eq!(lines[3], "- `user_id` = `guest`");
        assert_eq!(lines[4], "span `request`:");
        assert_eq!(lines[5], "- `uri` = `/api/subscribe`");
    }

    #[test]
    fn long_content_is_capped() {
        let mut long = event();
        long.message = Some("x".repeat(5000));
        let content = format_content(&long);
        assert_eq!(content.chars().count(), CONTENT_LIMIT);
        assert!(content.ends_with(TRUNCATION_SUFFIX));
    }
}
