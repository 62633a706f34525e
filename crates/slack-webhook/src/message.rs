//! Message types accepted by Slack incoming webhooks.
//!
//! Fields serialize in declaration order, so a given message always encodes
//! to the same bytes.

use serde::{Deserialize, Serialize};

/// A webhook message carrying one or more attachments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    /// Channel override (e.g., "#ops").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    /// Attachments, rendered in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl SlackMessage {
    /// Create an empty message addressed to a channel.
    pub fn to_channel(channel: impl Into<String>) -> Self {
        Self {
            channel: Some(channel.into()),
            ..Default::default()
        }
    }

    /// Append an attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Encode the message as the JSON request body.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// A colored attachment block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Sidebar color as a hex string (e.g., "#FF0000").
    pub color: String,

    /// Bold title line.
    pub title: String,

    /// Ordered label/value pairs.
    #[serde(default)]
    pub fields: Vec<AttachmentField>,

    /// Small footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    /// Unix timestamp (seconds) shown next to the footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl Attachment {
    /// Create an attachment with a color and title.
    pub fn new(color: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Append a field.
    pub fn field(mut self, field: AttachmentField) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the footer text.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Set the footer timestamp.
    pub fn timestamp(mut self, ts: i64) -> Self {
        self.ts = Some(ts);
        self
    }
}

/// A single label/value pair in an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    /// Short fields render side by side.
    pub short: bool,
}

impl AttachmentField {
    /// A field rendered in a half-width column.
    pub fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }

    /// A field spanning the full attachment width.
    pub fn long(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }
}
