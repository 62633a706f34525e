//! Slack incoming-webhook client library.
//!
//! This crate provides the message schema accepted by Slack incoming webhooks
//! and a small HTTP client that delivers a message with a single POST. It
//! supports:
//!
//! - Building attachment-style messages with ordered fields
//! - Delivering a message to a webhook URL over a shared connection pool
//!
//! # Example
//!
//! ```no_run
//! use slack_webhook::{Attachment, AttachmentField, SlackMessage, WebhookClient};
//!
//! # async fn example() -> Result<(), slack_webhook::WebhookError> {
//! let client = WebhookClient::new()?;
//!
//! let attachment = Attachment::new("#36A64F", "Deploy finished")
//!     .field(AttachmentField::short("Region", "us-east-1"))
//!     .footer("deploy-bot");
//! let message = SlackMessage::to_channel("#ops").attachment(attachment);
//!
//! let status = client.post("https://hooks.slack.com/services/T/B/X", &message).await?;
//! println!("Delivered with status {}", status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod message;

pub use client::WebhookClient;
pub use error::WebhookError;
pub use message::{Attachment, AttachmentField, SlackMessage};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
