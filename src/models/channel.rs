use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::schedule::Schedule;
use super::user::User;

/// Delivery mechanism of a channel. Unknown types are kept verbatim so a
/// draft round-trips to the backend unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelType {
    Email,
    Slack,
    Other(String),
}

impl ChannelType {
    pub fn as_str(&self) -> &str {
        match self {
            ChannelType::Email => "email",
            ChannelType::Slack => "slack",
            ChannelType::Other(name) => name,
        }
    }
}

impl From<String> for ChannelType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "email" => ChannelType::Email,
            "slack" => ChannelType::Slack,
            _ => ChannelType::Other(value),
        }
    }
}

impl From<&str> for ChannelType {
    fn from(value: &str) -> Self {
        ChannelType::from(value.to_string())
    }
}

impl From<ChannelType> for String {
    fn from(value: ChannelType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub channel_type: ChannelType,
    /// Only meaningful for email channels.
    #[serde(default)]
    pub recipients: Vec<User>,
    /// Provider-specific settings, e.g. `{"channel": "#general"}` for Slack.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Map::is_empty"
    )]
    pub details: Map<String, Value>,
    #[serde(flatten)]
    pub schedule: Schedule,
}

fn default_enabled() -> bool {
    true
}

// The backend sends `"details": null` for channels without provider settings.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Channel {
    pub fn new(channel_type: ChannelType, schedule: Schedule) -> Self {
        Self {
            id: None,
            enabled: true,
            channel_type,
            recipients: Vec::new(),
            details: Map::new(),
            schedule,
        }
    }

    pub fn email(recipients: Vec<User>, schedule: Schedule) -> Self {
        Self {
            recipients,
            ..Self::new(ChannelType::Email, schedule)
        }
    }

    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::{ScheduleDay, ScheduleType};

    #[test]
    fn unknown_channel_types_round_trip() {
        let raw = serde_json::json!({
            "enabled": true,
            "channel_type": "webhook",
            "schedule_type": "hourly",
            "schedule_day": null,
            "schedule_frame": null,
            "schedule_hour": null
        });
        let channel: Channel = serde_json::from_value(raw).unwrap();
        assert_eq!(channel.channel_type, ChannelType::Other("webhook".to_string()));
        assert_eq!(channel.schedule.schedule_type, ScheduleType::Hourly);

        let back = serde_json::to_value(&channel).unwrap();
        assert_eq!(back["channel_type"], "webhook");
    }

    #[test]
    fn slack_details_are_readable() {
        let raw = serde_json::json!({
            "channel_type": "slack",
            "details": { "channel": "#general" },
            "schedule_type": "weekly",
            "schedule_day": "fri",
            "schedule_hour": 9
        });
        let channel: Channel = serde_json::from_value(raw).unwrap();
        assert!(channel.enabled);
        assert_eq!(channel.detail_str("channel"), Some("#general"));
        assert_eq!(channel.schedule.schedule_day, Some(ScheduleDay::Fri));
        assert_eq!(channel.schedule.schedule_hour, Some(9));
    }

    #[test]
    fn null_details_read_as_empty() {
        let raw = serde_json::json!({
            "channel_type": "email",
            "details": null,
            "recipients": [{ "id": 1, "email": "ada@example.com" }],
            "schedule_type": "daily",
            "schedule_hour": 8
        });
        let channel: Channel = serde_json::from_value(raw).unwrap();
        assert!(channel.details.is_empty());
        assert_eq!(channel.detail_str("channel"), None);
        assert_eq!(channel.recipients.len(), 1);

        let back = serde_json::to_value(&channel).unwrap();
        assert!(back.get("details").is_none());
    }
}
