//! Resolution of a channel to its webhook URL.

use std::collections::HashMap;
use std::env;

use tracing::warn;

/// Setting holding the fallback webhook.
pub const DEFAULT_WEBHOOK_KEY: &str = "SLACK_WEBHOOK_URL";

/// Prefix of per-channel webhook settings.
pub const CHANNEL_WEBHOOK_PREFIX: &str = "SLACK_WEBHOOK_URL_";

/// Setting name for a channel's webhook.
///
/// The channel is uppercased and every character other than an ASCII letter
/// or digit becomes `_`, so `"my-team"` and `"MY_TEAM"` share a key.
pub fn lookup_key(channel: &str) -> String {
    let normalized: String = channel
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}{}", CHANNEL_WEBHOOK_PREFIX, normalized)
}

/// A resolved delivery endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Channel the endpoint was resolved for.
    pub channel: String,
    pub webhook_url: String,
    /// True when the default webhook was used.
    pub is_default: bool,
}

/// Webhook settings, keyed by setting name.
#[derive(Clone, Default)]
pub struct WebhookDirectory {
    urls: HashMap<String, String>,
}

impl WebhookDirectory {
    /// Snapshot webhook settings from the process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Build a directory from key/value pairs.
    ///
    /// Keys other than the default and per-channel settings are dropped, as
    /// are blank values.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let urls = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, v)| {
                (k == DEFAULT_WEBHOOK_KEY || k.starts_with(CHANNEL_WEBHOOK_PREFIX))
                    && !v.trim().is_empty()
            })
            .collect();
        Self { urls }
    }

    /// Add or replace a setting.
    pub fn with(mut self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.urls.insert(key.into(), url.into());
        self
    }

    /// The channel's own webhook, if configured.
    pub fn channel_url(&self, channel: &str) -> Option<&str> {
        self.urls.get(&lookup_key(channel)).map(String::as_str)
    }

    /// The fallback webhook, if configured.
    pub fn default_url(&self) -> Option<&str> {
        self.urls.get(DEFAULT_WEBHOOK_KEY).map(String::as_str)
    }

    /// Number of channels with their own webhook.
    pub fn channel_count(&self) -> usize {
        self.urls
            .keys()
            .filter(|k| k.starts_with(CHANNEL_WEBHOOK_PREFIX))
            .count()
    }

    /// Resolve the webhook for a channel, falling back to the default.
    pub fn resolve(&self, channel: &str) -> Option<Destination> {
        if let Some(url) = self.channel_url(channel) {
            return Some(Destination {
                channel: channel.to_string(),
                webhook_url: url.to_string(),
                is_default: false,
            });
        }

        let url = self.default_url()?;
        warn!(
            channel = %channel,
            key = %lookup_key(channel),
            "No webhook URL found for channel, using default webhook"
        );
        Some(Destination {
            channel: channel.to_string(),
            webhook_url: url.to_string(),
            is_default: true,
        })
    }
}

// Webhook URLs embed credentials, so only key names are printed.
impl std::fmt::Debug for WebhookDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.urls.keys().collect();
        keys.sort();
        f.debug_struct("WebhookDirectory")
            .field("keys", &keys)
            .finish()
    }
}
