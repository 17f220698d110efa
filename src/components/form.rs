use super::channels::AlertEditChannels;
use super::schedule::AlertEditSchedule;
use super::toggles::AlertGoalToggles;
use super::view::Element;
use crate::error::AlertError;
use crate::models::{Alert, AlertSetting, AlertType, Channel, ChannelType, Schedule, User, Viewer};
use crate::services::ChannelDirectory;

/// A user interaction with the alert form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    SetSetting(AlertSetting, bool),
    SetSchedule(Schedule),
    /// A whole channel set reported by an external channel editor.
    ReplaceChannels(Vec<Channel>),
    AddChannel(ChannelType),
    SetChannelEnabled(ChannelType, bool),
    SetRecipients(Vec<User>),
    SetChannelDetail {
        channel_type: ChannelType,
        key: String,
        value: String,
    },
}

impl FormEvent {
    fn touches_channels(&self) -> bool {
        !matches!(self, FormEvent::SetSetting(..) | FormEvent::SetSchedule(_))
    }
}

/// Goal toggles, schedule editor and, for administrators, the channel editor.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEditForm {
    pub alert_type: AlertType,
    pub goal_toggles: AlertGoalToggles,
    pub schedule: AlertEditSchedule,
    pub channels: Option<AlertEditChannels>,
}

impl AlertEditForm {
    pub fn new(alert_type: AlertType, viewer: &Viewer, directory: ChannelDirectory) -> Self {
        let channels = viewer
            .is_admin
            .then(|| AlertEditChannels::new(viewer.user.clone(), directory));
        Self {
            alert_type,
            goal_toggles: AlertGoalToggles::new(alert_type),
            schedule: AlertEditSchedule::new(alert_type),
            channels,
        }
    }

    /// Broadcasts a picker schedule to every channel of the draft.
    pub fn on_schedule_change(&self, alert: &Alert, schedule: Schedule) -> Alert {
        alert.with_schedule(schedule)
    }

    pub fn apply(&self, alert: &Alert, event: FormEvent) -> Result<Alert, AlertError> {
        if event.touches_channels() && self.channels.is_none() {
            return Err(AlertError::PermissionDenied);
        }

        let next = match event {
            FormEvent::SetSetting(setting, value) => alert.with_setting(setting, value),
            FormEvent::SetSchedule(schedule) => {
                self.schedule.picker.validate(&schedule)?;
                self.on_schedule_change(alert, schedule)
            }
            FormEvent::ReplaceChannels(channels) => {
                let editor = self.channel_editor()?;
                editor.on_set_pulse(Alert {
                    channels,
                    ..alert.clone()
                })
            }
            FormEvent::AddChannel(channel_type) => {
                self.channel_editor()?.add_channel(alert, channel_type)
            }
            FormEvent::SetChannelEnabled(channel_type, enabled) => {
                self.channel_editor()?
                    .set_enabled(alert, &channel_type, enabled)
            }
            FormEvent::SetRecipients(recipients) => {
                self.channel_editor()?.set_recipients(alert, recipients)
            }
            FormEvent::SetChannelDetail {
                channel_type,
                key,
                value,
            } => self
                .channel_editor()?
                .set_channel_detail(alert, &channel_type, &key, &value),
        };
        Ok(next)
    }

    fn channel_editor(&self) -> Result<&AlertEditChannels, AlertError> {
        self.channels.as_ref().ok_or(AlertError::PermissionDenied)
    }

    pub fn render(&self, alert: &Alert) -> Element {
        let mut children = Vec::new();
        if let Some(toggles) = self.goal_toggles.render(alert) {
            children.push(toggles);
        }
        children.push(self.schedule.render(&alert.schedule()));
        if let Some(channels) = &self.channels {
            children.push(channels.render(alert));
        }
        Element::section("alert-edit-form", children)
    }
}
