use serde_json::Value;
use tracing::debug;

use super::schedule::SchedulePicker;
use super::view::Element;
use crate::formatting::interpolate;
use crate::models::{Alert, Channel, ChannelType, Schedule, User};
use crate::services::{ChannelDirectory, Loadable, PulseDirectory};

/// Delivery section of the alert form, shown to administrators.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEditChannels {
    pub user: User,
    pub directory: ChannelDirectory,
}

impl AlertEditChannels {
    pub fn new(user: User, directory: ChannelDirectory) -> Self {
        Self { user, directory }
    }

    /// Loads channel options and the user directory before first render.
    pub async fn mount(user: User, pulse: &dyn PulseDirectory) -> Self {
        Self::new(user, ChannelDirectory::load(pulse).await)
    }

    /// Accepts a channel set from the editor, re-applying the email channel's
    /// schedule to every channel. Without an email channel the alert is returned as-is.
    pub fn on_set_pulse(&self, alert: Alert) -> Alert {
        let Some(schedule) = alert.email_channel().map(Schedule::from_channel) else {
            return alert;
        };
        let mut next = alert;
        next.set_schedule(schedule);
        next
    }

    /// Appends a channel of `channel_type` if the backend offers it and the alert lacks it.
    pub fn add_channel(&self, alert: &Alert, channel_type: ChannelType) -> Alert {
        if alert.channel(&channel_type).is_some() {
            return alert.clone();
        }
        let Some(spec) = self
            .directory
            .form_input
            .value()
            .and_then(|input| input.spec(&channel_type))
        else {
            debug!(%channel_type, "Channel type not offered; ignoring add.");
            return alert.clone();
        };

        let picker = SchedulePicker::for_alerts();
        let schedule_type = spec
            .schedules
            .iter()
            .copied()
            .find(|t| picker.schedule_options.contains(t))
            .unwrap_or_default();
        let default_schedule = picker
            .change_type(&Schedule::default(), schedule_type)
            .unwrap_or_else(|_| Schedule::new_alert_default());
        let mut next = alert.clone();
        next.channels.push(Channel::new(channel_type, default_schedule));
        if alert.email_channel().is_none() && !alert.channels.is_empty() {
            next.set_schedule(alert.schedule());
        }
        self.on_set_pulse(next)
    }

    pub fn set_enabled(&self, alert: &Alert, channel_type: &ChannelType, enabled: bool) -> Alert {
        self.edit_channel(alert, channel_type, |channel| channel.enabled = enabled)
    }

    pub fn set_recipients(&self, alert: &Alert, recipients: Vec<User>) -> Alert {
        self.edit_channel(alert, &ChannelType::Email, move |channel| {
            channel.recipients = recipients
        })
    }

    pub fn set_channel_detail(
        &self,
        alert: &Alert,
        channel_type: &ChannelType,
        key: &str,
        value: &str,
    ) -> Alert {
        self.edit_channel(alert, channel_type, |channel| {
            channel
                .details
                .insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn edit_channel(
        &self,
        alert: &Alert,
        channel_type: &ChannelType,
        edit: impl FnOnce(&mut Channel),
    ) -> Alert {
        let mut next = alert.clone();
        if let Some(channel) = next
            .channels
            .iter_mut()
            .find(|c| &c.channel_type == channel_type)
        {
            edit(channel);
        }
        self.on_set_pulse(next)
    }

    pub fn render(&self, alert: &Alert) -> Element {
        let mut children = vec![Element::heading(3, t!("channels.heading").to_string())];

        let form_input = match &self.directory.form_input {
            Loadable::Loaded(input) => Some(input.clone()),
            Loadable::Failed(error) => {
                children.push(Element::ErrorNotice {
                    message: interpolate(
                        &t!("channels.form_input_failed"),
                        &[("error", error.clone())],
                    ),
                });
                None
            }
            Loadable::NotLoaded | Loadable::Loading => {
                children.push(Element::Loading {
                    label: t!("channels.loading_form_input").to_string(),
                });
                None
            }
        };

        let user_list = match &self.directory.users {
            Loadable::Loaded(users) => Some(users.clone()),
            Loadable::Failed(error) => {
                children.push(Element::ErrorNotice {
                    message: interpolate(&t!("channels.users_failed"), &[("error", error.clone())]),
                });
                None
            }
            Loadable::NotLoaded | Loadable::Loading => {
                children.push(Element::Loading {
                    label: t!("channels.loading_users").to_string(),
                });
                None
            }
        };

        if let (Some(form_input), Some(user_list)) = (form_input, user_list) {
            children.push(Element::ChannelEditor {
                channels: alert.channels.clone(),
                form_input,
                user: self.user.clone(),
                user_list,
                hide_schedule_picker: true,
                email_recipient_text: t!("channels.email_recipient_text").to_string(),
            });
        }

        Element::section("mt4 pt2", children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelSpec, FormInput, Question, ScheduleDay, ScheduleType};

    fn ada() -> User {
        User::with_id(1, "ada@example.com")
    }

    fn form_input() -> FormInput {
        let mut input = FormInput::default();
        input.channels.insert(
            "email".to_string(),
            ChannelSpec {
                channel_type: ChannelType::Email,
                name: "Email".to_string(),
                allows_recipients: true,
                schedules: vec![ScheduleType::Daily, ScheduleType::Weekly],
                configured: true,
                fields: Vec::new(),
            },
        );
        input.channels.insert(
            "slack".to_string(),
            ChannelSpec {
                channel_type: ChannelType::Slack,
                name: "Slack".to_string(),
                allows_recipients: false,
                schedules: vec![ScheduleType::Hourly, ScheduleType::Daily],
                configured: true,
                fields: Vec::new(),
            },
        );
        input
    }

    fn editor() -> AlertEditChannels {
        AlertEditChannels::new(
            ada(),
            ChannelDirectory {
                form_input: Loadable::Loaded(form_input()),
                users: Loadable::Loaded(vec![ada()]),
            },
        )
    }

    fn hourly_alert() -> Alert {
        let alert = Alert::new_draft(&Question::new(1, "table"), &ada());
        alert.with_schedule(Schedule {
            schedule_type: ScheduleType::Hourly,
            schedule_day: None,
            schedule_frame: None,
            schedule_hour: None,
        })
    }

    #[test]
    fn added_channel_takes_the_email_schedule() {
        let alert = hourly_alert();
        let next = editor().add_channel(&alert, ChannelType::Slack);

        assert_eq!(next.channels.len(), 2);
        assert!(next.has_shared_schedule());
        assert_eq!(next.channels[1].schedule, alert.schedule());
        assert_eq!(next.channels[1].channel_type, ChannelType::Slack);
        assert!(next.channels[1].enabled);
    }

    #[test]
    fn add_channel_is_a_noop_for_duplicates_and_unknown_types() {
        let alert = hourly_alert();
        let editor = editor();
        assert_eq!(editor.add_channel(&alert, ChannelType::Email), alert);
        assert_eq!(
            editor.add_channel(&alert, ChannelType::Other("webhook".to_string())),
            alert
        );

        let unloaded = AlertEditChannels::new(ada(), ChannelDirectory::loading());
        assert_eq!(unloaded.add_channel(&alert, ChannelType::Slack), alert);
    }

    fn editor_offering(channel_type: ChannelType, schedules: Vec<ScheduleType>) -> AlertEditChannels {
        let mut input = FormInput::default();
        input.channels.insert(
            channel_type.as_str().to_string(),
            ChannelSpec {
                channel_type: channel_type.clone(),
                name: channel_type.as_str().to_string(),
                allows_recipients: false,
                schedules,
                configured: true,
                fields: Vec::new(),
            },
        );
        AlertEditChannels::new(
            ada(),
            ChannelDirectory {
                form_input: Loadable::Loaded(input),
                users: Loadable::Loaded(vec![ada()]),
            },
        )
    }

    #[test]
    fn first_channel_gets_a_consistent_alert_schedule() {
        let mut alert = hourly_alert();
        alert.channels.clear();

        let hourly = editor_offering(ChannelType::Slack, vec![ScheduleType::Hourly])
            .add_channel(&alert, ChannelType::Slack);
        assert_eq!(
            hourly.channels[0].schedule,
            Schedule {
                schedule_type: ScheduleType::Hourly,
                schedule_day: None,
                schedule_frame: None,
                schedule_hour: None,
            }
        );

        let weekly = editor_offering(
            ChannelType::Slack,
            vec![ScheduleType::Monthly, ScheduleType::Weekly],
        )
        .add_channel(&alert, ChannelType::Slack);
        assert_eq!(
            weekly.channels[0].schedule,
            Schedule {
                schedule_type: ScheduleType::Weekly,
                schedule_day: Some(ScheduleDay::Mon),
                schedule_frame: None,
                schedule_hour: Some(8),
            }
        );

        let monthly_only = editor_offering(ChannelType::Slack, vec![ScheduleType::Monthly])
            .add_channel(&alert, ChannelType::Slack);
        assert_eq!(
            monthly_only.channels[0].schedule.schedule_type,
            ScheduleType::Daily
        );
        assert_eq!(monthly_only.channels[0].schedule.schedule_frame, None);
    }

    #[test]
    fn on_set_pulse_propagates_email_schedule() {
        let mut alert = hourly_alert();
        alert
            .channels
            .push(Channel::new(ChannelType::Slack, Schedule::new_alert_default()));
        assert!(!alert.has_shared_schedule());

        let next = editor().on_set_pulse(alert.clone());
        assert!(next.has_shared_schedule());
        assert_eq!(next.channels[1].schedule.schedule_type, ScheduleType::Hourly);
    }

    #[test]
    fn on_set_pulse_without_email_is_unchanged() {
        let mut alert = hourly_alert();
        alert.channels = vec![
            Channel::new(ChannelType::Slack, Schedule::new_alert_default()),
            Channel::new(ChannelType::Other("webhook".into()), Schedule::default()),
        ];
        assert_eq!(editor().on_set_pulse(alert.clone()), alert);
    }

    #[test]
    fn channel_edits_keep_shared_schedule() {
        let editor = editor();
        let alert = editor.add_channel(&hourly_alert(), ChannelType::Slack);

        let alert = editor.set_channel_detail(&alert, &ChannelType::Slack, "channel", "#general");
        assert_eq!(alert.channels[1].detail_str("channel"), Some("#general"));
        assert!(alert.has_shared_schedule());

        let bob = User::with_id(2, "bob@example.com");
        let alert = editor.set_recipients(&alert, vec![ada(), bob.clone()]);
        assert_eq!(alert.channels[0].recipients, vec![ada(), bob]);
        assert!(alert.has_shared_schedule());

        let alert = editor.set_enabled(&alert, &ChannelType::Slack, false);
        assert!(!alert.channels[1].enabled);
        assert!(alert.has_shared_schedule());
    }

    #[test]
    fn render_shows_loading_and_errors() {
        let alert = hourly_alert();
        let loading = AlertEditChannels::new(ada(), ChannelDirectory::loading()).render(&alert);
        assert_eq!(
            loading.find_all(|e| matches!(e, Element::Loading { .. })).len(),
            2
        );

        let failed = AlertEditChannels::new(
            ada(),
            ChannelDirectory {
                form_input: Loadable::Loaded(form_input()),
                users: Loadable::Failed("boom".to_string()),
            },
        )
        .render(&alert);
        let notices = failed.find_all(|e| matches!(e, Element::ErrorNotice { .. }));
        assert_eq!(notices.len(), 1);
        assert!(failed
            .find_all(|e| matches!(e, Element::ChannelEditor { .. }))
            .is_empty());

        let ready = editor().render(&alert);
        assert_eq!(
            ready
                .find_all(|e| matches!(e, Element::ChannelEditor { hide_schedule_picker: true, .. }))
                .len(),
            1
        );
    }
}
