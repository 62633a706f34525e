//! Inbound SNS envelope and CloudWatch alarm types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ForwarderError;

/// Event envelope delivered by SNS to the function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

impl SnsEnvelope {
    /// Wrap a single alarm message the way SNS would deliver it.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            records: vec![SnsRecord {
                sns: SnsNotification {
                    message: message.into(),
                    ..Default::default()
                },
            }],
        }
    }

    /// The first record's notification. Later records are ignored.
    pub fn first_notification(&self) -> Result<&SnsNotification, ForwarderError> {
        self.records
            .first()
            .map(|record| &record.sns)
            .ok_or_else(|| ForwarderError::MalformedEvent("event contains no records".to_string()))
    }
}

/// One record in the SNS envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsNotification,
}

/// The SNS notification carried by a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsNotification {
    /// Message body; for CloudWatch alarms this is a JSON document.
    pub message: String,

    #[serde(default)]
    pub message_id: Option<String>,

    #[serde(default)]
    pub topic_arn: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,
}

/// Alarm state reported by CloudWatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmState {
    Alarm,
    Ok,
    InsufficientData,
    /// Any value CloudWatch is not known to send.
    Other(String),
}

impl AlarmState {
    /// Parse a `NewStateValue`. Matching is exact; unknown text is kept as-is.
    pub fn parse(value: &str) -> Self {
        match value {
            "ALARM" => AlarmState::Alarm,
            "OK" => AlarmState::Ok,
            "INSUFFICIENT_DATA" => AlarmState::InsufficientData,
            other => AlarmState::Other(other.to_string()),
        }
    }

    /// The state text exactly as received.
    pub fn as_str(&self) -> &str {
        match self {
            AlarmState::Alarm => "ALARM",
            AlarmState::Ok => "OK",
            AlarmState::InsufficientData => "INSUFFICIENT_DATA",
            AlarmState::Other(value) => value,
        }
    }

    /// Whether this state is the firing state.
    pub fn is_alarm(&self) -> bool {
        matches!(self, AlarmState::Alarm)
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alarm message as it appears on the wire. Every field is optional here so
/// that absence can be reported by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawAlarm {
    #[serde(default)]
    alarm_name: Option<String>,
    #[serde(default)]
    new_state_value: Option<String>,
    #[serde(default)]
    new_state_reason: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    state_change_time: Option<String>,
    #[serde(default)]
    alarm_description: Option<serde_json::Value>,
}

/// A CloudWatch alarm state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmEvent {
    pub alarm_name: String,
    pub new_state: AlarmState,
    pub new_state_reason: String,
    pub region: String,
    pub state_change_time: DateTime<Utc>,
    /// Free text that may embed routing configuration as JSON.
    pub description: Option<String>,
}

impl AlarmEvent {
    /// Parse an alarm from an SNS message body.
    pub fn from_message(message: &str) -> Result<Self, ForwarderError> {
        let raw: RawAlarm = serde_json::from_str(message).map_err(|e| {
            ForwarderError::MalformedEvent(format!("unreadable alarm message: {}", e))
        })?;

        let alarm_name = required(raw.alarm_name, "AlarmName")?;
        let new_state_value = required(raw.new_state_value, "NewStateValue")?;
        let new_state_reason = required(raw.new_state_reason, "NewStateReason")?;
        let region = required(raw.region, "Region")?;
        let state_change_time = required(raw.state_change_time, "StateChangeTime")?;

        // Only a string description can carry routing config
        let description = match raw.alarm_description {
            Some(serde_json::Value::String(text)) => Some(text),
            _ => None,
        };

        Ok(Self {
            alarm_name,
            new_state: AlarmState::parse(&new_state_value),
            new_state_reason,
            region,
            state_change_time: parse_state_change_time(&state_change_time)?,
            description,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ForwarderError> {
    value.ok_or(ForwarderError::MissingField(field))
}

/// Parse a `StateChangeTime` value.
///
/// Accepts RFC 3339 as well as the CloudWatch form with a colonless offset,
/// e.g. `2024-01-01T00:00:00.000+0000`.
pub fn parse_state_change_time(raw: &str) -> Result<DateTime<Utc>, ForwarderError> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ForwarderError::MalformedEvent(format!("invalid StateChangeTime {:?}: {}", raw, e))
        })
}
