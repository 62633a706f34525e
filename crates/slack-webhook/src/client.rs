//! Slack incoming-webhook HTTP client.

use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::error::WebhookError;
use crate::message::SlackMessage;

/// Client for delivering messages to Slack incoming webhooks.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct WebhookClient {
    http: Client,
}

impl WebhookClient {
    /// Create a client with the transport's default settings.
    pub fn new() -> Result<Self, WebhookError> {
        let http = Client::builder().build().map_err(WebhookError::Http)?;
        Ok(Self { http })
    }

    /// Create a client on top of an existing connection pool.
    pub fn with_http(http: Client) -> Self {
        Self { http }
    }

    /// Post a message to a webhook URL.
    ///
    /// Makes exactly one request. Any status outside 2xx is an error carrying
    /// the response body.
    pub async fn post(
        &self,
        webhook_url: &str,
        message: &SlackMessage,
    ) -> Result<StatusCode, WebhookError> {
        let body = message.to_json()?;
        debug!(bytes = body.len(), "Posting webhook message");

        let response = self
            .http
            .post(webhook_url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(WebhookError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Status { status, body });
        }

        info!(status = status.as_u16(), "Webhook accepted message");
        Ok(status)
    }
}
