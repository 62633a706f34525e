//! Routing configuration embedded in an alarm description.

use serde_json::Value;

/// Channel used when the description names none.
pub const DEFAULT_CHANNEL: &str = "general";

/// Routing settings read from the alarm description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingConfig {
    pub slack_channel: Option<String>,
}

impl RoutingConfig {
    /// Parse a description such as `{"slack_channel": "infra"}`.
    ///
    /// Never fails: a missing, non-JSON or non-object description, or a
    /// non-string channel, gives an empty config.
    pub fn parse(description: Option<&str>) -> Self {
        let Some(text) = description else {
            return Self::default();
        };

        let slack_channel = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(mut map)) => match map.remove("slack_channel") {
                Some(Value::String(channel)) => Some(channel),
                _ => None,
            },
            _ => None,
        };

        Self { slack_channel }
    }

    /// The configured channel, or [`DEFAULT_CHANNEL`].
    pub fn channel(&self) -> &str {
        self.slack_channel.as_deref().unwrap_or(DEFAULT_CHANNEL)
    }
}
