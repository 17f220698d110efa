use super::view::{rich, Action, Element, Inline};
use crate::formatting::inflect;
use crate::models::{Alert, Channel, ChannelType};

/// "Danger zone" panel of the edit modal.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAlertSection {
    pub alert: Alert,
}

impl DeleteAlertSection {
    pub fn new(alert: Alert) -> Self {
        Self { alert }
    }

    /// One sentence per channel describing what stops once the alert is deleted.
    pub fn confirm_items(&self) -> Vec<Vec<Inline>> {
        self.alert.channels.iter().map(confirm_item).collect()
    }

    pub fn render(&self) -> Element {
        Element::section(
            "DangerZone mt4 pt4 mb2 p3 rounded bordered relative",
            vec![
                Element::heading(3, t!("delete.danger_zone").to_string()),
                Element::heading(4, t!("delete.heading").to_string()),
                Element::paragraph(vec![Inline::Text(t!("delete.description").to_string())]),
                Element::Button {
                    label: t!("delete.trigger").to_string(),
                    action: Action::OpenDelete,
                    primary: false,
                    danger: true,
                },
                Element::ConfirmDialog {
                    object_type: "alert".to_string(),
                    title: t!("delete.confirm_title").to_string(),
                    confirm_items: self.confirm_items(),
                },
            ],
        )
    }
}

fn confirm_item(channel: &Channel) -> Vec<Inline> {
    match &channel.channel_type {
        ChannelType::Email => {
            let count = channel.recipients.len();
            rich(
                &t!("delete.email"),
                &[
                    ("count", count.to_string()),
                    ("noun", inflect("address", count)),
                ],
            )
        }
        ChannelType::Slack => rich(
            &t!("delete.slack"),
            &[(
                "channel",
                channel.detail_str("channel").unwrap_or_default().to_string(),
            )],
        ),
        other => rich(
            &t!("delete.other"),
            &[("channel_type", other.as_str().to_string())],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::view::plain_text;
    use crate::models::{Question, Schedule, User};

    fn alert_with(channels: Vec<Channel>) -> Alert {
        let mut alert = Alert::new_draft(
            &Question::new(1, "table"),
            &User::with_id(1, "ada@example.com"),
        );
        alert.channels = channels;
        alert
    }

    fn email_to(count: i64) -> Channel {
        let recipients = (0..count)
            .map(|i| User::with_id(i, &format!("user{i}@example.com")))
            .collect();
        Channel::email(recipients, Schedule::new_alert_default())
    }

    fn sentences(alert: Alert) -> Vec<String> {
        DeleteAlertSection::new(alert)
            .confirm_items()
            .iter()
            .map(|item| plain_text(item))
            .collect()
    }

    #[test]
    fn email_recipients_are_counted_and_pluralized() {
        assert_eq!(
            sentences(alert_with(vec![email_to(3)])),
            vec!["This alert will no longer be emailed to 3 addresses."]
        );
        assert_eq!(
            sentences(alert_with(vec![email_to(1)])),
            vec!["This alert will no longer be emailed to 1 address."]
        );
    }

    #[test]
    fn count_is_emphasized() {
        let items = DeleteAlertSection::new(alert_with(vec![email_to(3)])).confirm_items();
        assert_eq!(items[0][1], Inline::Strong("3 addresses".to_string()));
    }

    #[test]
    fn slack_channel_is_named() {
        let mut slack = Channel::new(ChannelType::Slack, Schedule::new_alert_default());
        slack
            .details
            .insert("channel".to_string(), serde_json::json!("#general"));
        assert_eq!(
            sentences(alert_with(vec![slack])),
            vec!["Slack channel #general will no longer get this alert."]
        );
    }

    #[test]
    fn unknown_types_use_generic_wording() {
        let webhook = Channel::new(
            ChannelType::Other("webhook".to_string()),
            Schedule::new_alert_default(),
        );
        assert_eq!(
            sentences(alert_with(vec![email_to(2), webhook])),
            vec![
                "This alert will no longer be emailed to 2 addresses.",
                "Channel webhook will no longer receive this alert.",
            ]
        );
    }

    #[test]
    fn render_carries_confirm_dialog() {
        let section = DeleteAlertSection::new(alert_with(vec![email_to(1)])).render();
        let dialogs = section.find_all(|e| matches!(e, Element::ConfirmDialog { .. }));
        match dialogs.as_slice() {
            [Element::ConfirmDialog {
                title,
                confirm_items,
                ..
            }] => {
                assert_eq!(title, "Delete this alert?");
                assert_eq!(confirm_items.len(), 1);
            }
            other => panic!("expected one dialog, got {other:?}"),
        }
    }
}
