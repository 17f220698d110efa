use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::channel::ChannelType;
use super::schedule::ScheduleType;

/// A provider-specific setting the channel editor asks for (e.g. Slack's "Post to").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

/// What the backend offers for one channel type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub name: String,
    #[serde(default)]
    pub allows_recipients: bool,
    #[serde(default)]
    pub schedules: Vec<ScheduleType>,
    #[serde(default)]
    pub configured: bool,
    #[serde(default)]
    pub fields: Vec<ChannelField>,
}

/// Channel options available to alerts and pulses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelSpec>,
}

impl FormInput {
    pub fn spec(&self, channel_type: &ChannelType) -> Option<&ChannelSpec> {
        self.channels.get(channel_type.as_str())
    }
}
