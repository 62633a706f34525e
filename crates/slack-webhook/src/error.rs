//! Error types for slack-webhook.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when delivering to a Slack webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Webhook answered with a non-success status.
    #[error("Webhook returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl WebhookError {
    /// The HTTP status returned by the webhook, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            WebhookError::Http(e) => e.status(),
            WebhookError::Status { status, .. } => Some(*status),
            WebhookError::Json(_) => None,
        }
    }
}
