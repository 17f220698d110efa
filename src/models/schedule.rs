use serde::{Deserialize, Serialize};

use super::channel::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ScheduleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::Hourly => "hourly",
            ScheduleType::Daily => "daily",
            ScheduleType::Weekly => "weekly",
            ScheduleType::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for ScheduleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(ScheduleType::Hourly),
            "daily" => Ok(ScheduleType::Daily),
            "weekly" => Ok(ScheduleType::Weekly),
            "monthly" => Ok(ScheduleType::Monthly),
            other => Err(format!("unknown schedule type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleDay {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl ScheduleDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleDay::Sun => "sun",
            ScheduleDay::Mon => "mon",
            ScheduleDay::Tue => "tue",
            ScheduleDay::Wed => "wed",
            ScheduleDay::Thu => "thu",
            ScheduleDay::Fri => "fri",
            ScheduleDay::Sat => "sat",
        }
    }
}

impl std::str::FromStr for ScheduleDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sun" | "sunday" => Ok(ScheduleDay::Sun),
            "mon" | "monday" => Ok(ScheduleDay::Mon),
            "tue" | "tuesday" => Ok(ScheduleDay::Tue),
            "wed" | "wednesday" => Ok(ScheduleDay::Wed),
            "thu" | "thursday" => Ok(ScheduleDay::Thu),
            "fri" | "friday" => Ok(ScheduleDay::Fri),
            "sat" | "saturday" => Ok(ScheduleDay::Sat),
            other => Err(format!("unknown day '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleFrame {
    First,
    Mid,
    Last,
}

/// The four schedule fields every channel of an alert carries.
///
/// An alert has one logical schedule; the copies on each channel are kept equal
/// by routing every write through [`super::Alert::set_schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub schedule_type: ScheduleType,
    #[serde(default)]
    pub schedule_day: Option<ScheduleDay>,
    #[serde(default)]
    pub schedule_frame: Option<ScheduleFrame>,
    #[serde(default)]
    pub schedule_hour: Option<u8>,
}

impl Schedule {
    /// Schedule of a freshly created alert: daily at midnight.
    pub fn new_alert_default() -> Self {
        Self {
            schedule_type: ScheduleType::Daily,
            schedule_day: Some(ScheduleDay::Mon),
            schedule_frame: None,
            schedule_hour: Some(0),
        }
    }

    pub fn from_channel(channel: &Channel) -> Self {
        channel.schedule
    }

    /// Overwrites the channel's schedule fields, leaving everything else alone.
    pub fn apply_to(&self, channel: &mut Channel) {
        channel.schedule = *self;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_backend_field_names() {
        let json = serde_json::to_value(Schedule::new_alert_default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "schedule_type": "daily",
                "schedule_day": "mon",
                "schedule_frame": null,
                "schedule_hour": 0
            })
        );
    }

    #[test]
    fn parses_day_names() {
        assert_eq!("Friday".parse::<ScheduleDay>(), Ok(ScheduleDay::Fri));
        assert_eq!("tue".parse::<ScheduleDay>(), Ok(ScheduleDay::Tue));
        assert!("someday".parse::<ScheduleDay>().is_err());
    }
}
