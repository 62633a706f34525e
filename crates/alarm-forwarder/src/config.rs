//! Configuration for the alarm forwarder.

use std::env;

use crate::resolver::WebhookDirectory;

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Anything but `json` is plain text.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Configuration for the alarm forwarder.
#[derive(Debug, Clone, Default)]
pub struct ForwarderConfig {
    /// Webhook settings used to resolve destinations.
    pub webhooks: WebhookDirectory,

    /// Log line format.
    pub log_format: LogFormat,
}

impl ForwarderConfig {
    /// Create configuration from environment variables.
    ///
    /// Recognized environment variables:
    /// - `SLACK_WEBHOOK_URL` - Default webhook
    /// - `SLACK_WEBHOOK_URL_<CHANNEL>` - Per-channel webhook, channel
    ///   uppercased with separators as `_`
    /// - `LOG_FORMAT` - `json` or `text` (default: text)
    ///
    /// A missing webhook is not an error here; it fails the invocation that
    /// needs it.
    pub fn from_env() -> Self {
        let log_format = env::var("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        Self {
            webhooks: WebhookDirectory::from_env(),
            log_format,
        }
    }

    /// Create configuration with an explicit webhook directory.
    pub fn new(webhooks: WebhookDirectory) -> Self {
        Self {
            webhooks,
            log_format: LogFormat::default(),
        }
    }

    /// Set the log format.
    pub fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }
}
