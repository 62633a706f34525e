//! Formatting of alarm events as Slack messages.

use slack_webhook::{Attachment, AttachmentField, SlackMessage};

use crate::event::{AlarmEvent, AlarmState};
use crate::routing::RoutingConfig;

/// Attachment color for alarms in the firing state.
pub const ALARM_COLOR: &str = "#FF0000";

/// Attachment color for every other state.
pub const RESOLVED_COLOR: &str = "#36A64F";

/// Footer text on every notification.
pub const FOOTER: &str = "AWS CloudWatch Alarm";

/// Environment label of an alarm: the name up to its first hyphen.
///
/// A name without a hyphen is its own label; an empty name gives an empty
/// label.
pub fn environment_label(alarm_name: &str) -> &str {
    alarm_name.split('-').next().unwrap_or_default()
}

/// Attachment color for an alarm state.
pub fn severity_color(state: &AlarmState) -> &'static str {
    if state.is_alarm() {
        ALARM_COLOR
    } else {
        RESOLVED_COLOR
    }
}

/// Channel the alarm routes to, from its description.
pub fn channel_for(event: &AlarmEvent) -> String {
    RoutingConfig::parse(event.description.as_deref())
        .channel()
        .to_string()
}

/// Build the Slack notification for an alarm.
pub fn transform(event: &AlarmEvent) -> SlackMessage {
    let channel = channel_for(event);

    let attachment = Attachment::new(
        severity_color(&event.new_state),
        format!("CloudWatch Alarm: {}", event.alarm_name),
    )
    .field(AttachmentField::short("Status", event.new_state.as_str()))
    .field(AttachmentField::short("Region", event.region.as_str()))
    .field(AttachmentField::short(
        "Environment",
        environment_label(&event.alarm_name),
    ))
    .field(AttachmentField::short("Channel", channel.as_str()))
    .field(AttachmentField::long("Reason", event.new_state_reason.as_str()))
    .footer(FOOTER)
    .timestamp(event.state_change_time.timestamp());

    SlackMessage::to_channel(format!("#{}", channel)).attachment(attachment)
}
