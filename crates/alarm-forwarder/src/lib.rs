//! CloudWatch alarm to Slack forwarder.
//!
//! Each SNS notification carrying a CloudWatch alarm is turned into one
//! Slack attachment message and posted once to the webhook configured for
//! the alarm's channel. The channel comes from the alarm description, e.g.
//! `{"slack_channel": "infra"}`, and defaults to `general`.
//!
//! # Example
//!
//! ```no_run
//! use alarm_forwarder::{Forwarder, ForwarderConfig};
//! use slack_webhook::WebhookClient;
//!
//! # async fn example(payload: serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ForwarderConfig::from_env();
//! let forwarder = Forwarder::from_config(config, WebhookClient::new()?);
//!
//! let response = forwarder.handle_value(payload).await?;
//! println!("{}", response.body);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod forwarder;
pub mod logging;
pub mod resolver;
pub mod routing;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use config::{ForwarderConfig, LogFormat};
pub use error::ForwarderError;
pub use event::{AlarmEvent, AlarmState, SnsEnvelope, SnsNotification, SnsRecord};
pub use forwarder::{ForwardResponse, Forwarder};
pub use resolver::{lookup_key, Destination, WebhookDirectory};
pub use routing::{RoutingConfig, DEFAULT_CHANNEL};
pub use transform::{environment_label, severity_color, transform};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
