use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channel::{Channel, ChannelType};
use super::question::{AlertType, Question};
use super::schedule::Schedule;
use super::user::User;

pub type AlertId = i64;
pub type CardId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Rows,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
}

/// The two boolean settings a goal alert exposes as toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSetting {
    AlertAboveGoal,
    AlertFirstOnly,
}

impl AlertSetting {
    pub fn field_name(&self) -> &'static str {
        match self {
            AlertSetting::AlertAboveGoal => "alert_above_goal",
            AlertSetting::AlertFirstOnly => "alert_first_only",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AlertId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "alert_description", default)]
    pub description: Option<String>,
    pub card: Card,
    pub alert_condition: AlertCondition,
    #[serde(default)]
    pub alert_first_only: bool,
    /// Unset on row alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_above_goal: Option<bool>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Builds the draft shown when a user starts creating an alert on `question`.
    pub fn new_draft(question: &Question, creator: &User) -> Self {
        let (alert_condition, alert_first_only, alert_above_goal) = match question.alert_type() {
            AlertType::Rows => (AlertCondition::Rows, false, None),
            AlertType::TimeseriesGoal | AlertType::ProgressBarGoal => {
                (AlertCondition::Goal, true, Some(true))
            }
        };

        Self {
            id: None,
            name: Some("We should probably autogenerate the alert name".to_string()),
            description: Some("The description should be autogenerated too".to_string()),
            card: Card { id: question.id },
            alert_condition,
            alert_first_only,
            alert_above_goal,
            channels: vec![Channel::email(
                vec![creator.clone()],
                Schedule::new_alert_default(),
            )],
            creator: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// The alert's schedule, read from the first channel.
    pub fn schedule(&self) -> Schedule {
        self.channels
            .first()
            .map(Schedule::from_channel)
            .unwrap_or_else(Schedule::new_alert_default)
    }

    /// Writes `schedule` to every channel; no other channel field changes.
    pub fn set_schedule(&mut self, schedule: Schedule) {
        for channel in &mut self.channels {
            schedule.apply_to(channel);
        }
    }

    pub fn with_schedule(&self, schedule: Schedule) -> Alert {
        let mut next = self.clone();
        next.set_schedule(schedule);
        next
    }

    pub fn has_shared_schedule(&self) -> bool {
        let schedule = self.schedule();
        self.channels.iter().all(|c| c.schedule == schedule)
    }

    pub fn setting(&self, setting: AlertSetting) -> Option<bool> {
        match setting {
            AlertSetting::AlertAboveGoal => self.alert_above_goal,
            AlertSetting::AlertFirstOnly => Some(self.alert_first_only),
        }
    }

    pub fn with_setting(&self, setting: AlertSetting, value: bool) -> Alert {
        let mut next = self.clone();
        match setting {
            AlertSetting::AlertAboveGoal => next.alert_above_goal = Some(value),
            AlertSetting::AlertFirstOnly => next.alert_first_only = value,
        }
        next
    }

    pub fn channel(&self, channel_type: &ChannelType) -> Option<&Channel> {
        self.channels.iter().find(|c| &c.channel_type == channel_type)
    }

    pub fn email_channel(&self) -> Option<&Channel> {
        self.channel(&ChannelType::Email)
    }
}
