//! Error types for alarm-forwarder.

use slack_webhook::WebhookError;
use thiserror::Error;

/// Errors that abort a single forwarding invocation.
#[derive(Debug, Error)]
pub enum ForwarderError {
    /// Inbound envelope or alarm message could not be read.
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// A required alarm attribute is absent.
    #[error("Missing required alarm field: {0}")]
    MissingField(&'static str),

    /// Neither a per-channel nor a default webhook is configured.
    #[error("No webhook URL found for channel {channel}")]
    UnresolvedDestination { channel: String },

    /// Posting to the webhook failed.
    #[error("Delivery failed: {0}")]
    Delivery(#[from] WebhookError),
}

