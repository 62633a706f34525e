//! Per-event orchestration: parse, format, resolve, deliver.

use serde::{Deserialize, Serialize};
use slack_webhook::WebhookClient;
use tracing::{debug, error, info};

use crate::config::ForwarderConfig;
use crate::error::ForwarderError;
use crate::event::{AlarmEvent, SnsEnvelope};
use crate::resolver::WebhookDirectory;
use crate::transform::{channel_for, transform};

/// Confirmation text returned on success.
pub const SUCCESS_MESSAGE: &str = "Successfully sent alarm to Slack";

/// Result handed back to the invoking platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardResponse {
    pub status_code: u16,
    /// JSON-encoded confirmation string.
    pub body: String,
}

impl ForwardResponse {
    /// The success response.
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: serde_json::Value::from(SUCCESS_MESSAGE).to_string(),
        }
    }
}

/// Forwards alarm events to Slack.
///
/// Built once per process and shared by every invocation; holds no
/// per-event state.
#[derive(Debug, Clone)]
pub struct Forwarder {
    directory: WebhookDirectory,
    client: WebhookClient,
}

impl Forwarder {
    /// Create a forwarder from a webhook directory and a delivery client.
    pub fn new(directory: WebhookDirectory, client: WebhookClient) -> Self {
        Self { directory, client }
    }

    /// Create a forwarder from configuration.
    pub fn from_config(config: ForwarderConfig, client: WebhookClient) -> Self {
        Self::new(config.webhooks, client)
    }

    /// Handle a raw invocation payload.
    pub async fn handle_value(
        &self,
        payload: serde_json::Value,
    ) -> Result<ForwardResponse, ForwarderError> {
        debug!(payload = %payload, "Received event");
        let envelope: SnsEnvelope = serde_json::from_value(payload).map_err(|e| {
            error!(error = %e, "Error processing alarm: unreadable envelope");
            ForwarderError::MalformedEvent(format!("not an SNS envelope: {}", e))
        })?;
        self.handle_envelope(&envelope).await
    }

    /// Handle an SNS envelope, forwarding its first record.
    pub async fn handle_envelope(
        &self,
        envelope: &SnsEnvelope,
    ) -> Result<ForwardResponse, ForwarderError> {
        let notification = envelope.first_notification().inspect_err(|e| {
            error!(error = %e, "Error processing alarm");
        })?;

        info!(
            message_id = notification.message_id.as_deref().unwrap_or("-"),
            topic_arn = notification.topic_arn.as_deref().unwrap_or("-"),
            subject = notification.subject.as_deref().unwrap_or("-"),
            records = envelope.records.len(),
            "Processing SNS event"
        );

        let event = AlarmEvent::from_message(&notification.message).inspect_err(|e| {
            error!(error = %e, "Error processing alarm");
        })?;

        self.forward(&event).await
    }

    /// Format one alarm and deliver it to its channel's webhook.
    pub async fn forward(&self, event: &AlarmEvent) -> Result<ForwardResponse, ForwarderError> {
        let channel = channel_for(event);

        let result = self.deliver(event, &channel).await;
        if let Err(e) = &result {
            error!(
                alarm = %event.alarm_name,
                state = %event.new_state,
                channel = %channel,
                error = %e,
                "Error processing alarm"
            );
        }
        result
    }

    async fn deliver(
        &self,
        event: &AlarmEvent,
        channel: &str,
    ) -> Result<ForwardResponse, ForwarderError> {
        let message = transform(event);

        let destination = self
            .directory
            .resolve(channel)
            .ok_or_else(|| ForwarderError::UnresolvedDestination {
                channel: channel.to_string(),
            })?;

        let status = self.client.post(&destination.webhook_url, &message).await?;

        info!(
            alarm = %event.alarm_name,
            channel = %destination.channel,
            default_webhook = destination.is_default,
            status = status.as_u16(),
            "Message sent to Slack channel"
        );

        Ok(ForwardResponse::success())
    }

    /// The webhook directory.
    pub fn directory(&self) -> &WebhookDirectory {
        &self.directory
    }
}
