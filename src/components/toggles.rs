use super::view::{Element, RadioOption};
use crate::models::{Alert, AlertCondition, AlertSetting, AlertType};

/// A two-option radio bound to one boolean field of the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertSettingToggle {
    pub setting: AlertSetting,
    pub title: String,
    pub true_text: String,
    pub false_text: String,
}

impl AlertSettingToggle {
    pub fn render(&self, alert: &Alert) -> Element {
        Element::section(
            "mb4 pb2",
            vec![
                Element::heading(3, self.title.clone()),
                Element::Radio {
                    setting: self.setting,
                    value: alert.setting(self.setting),
                    options: vec![
                        RadioOption {
                            name: self.true_text.clone(),
                            value: true,
                        },
                        RadioOption {
                            name: self.false_text.clone(),
                            value: false,
                        },
                    ],
                },
            ],
        )
    }

    pub fn on_change(&self, alert: &Alert, value: bool) -> Alert {
        alert.with_setting(self.setting, value)
    }
}

pub struct AlertAboveGoalToggle;

impl AlertAboveGoalToggle {
    pub fn for_timeseries(is_timeseries: bool) -> AlertSettingToggle {
        let (title, true_text, false_text) = if is_timeseries {
            (
                t!("toggles.above_goal.timeseries_title"),
                t!("toggles.above_goal.timeseries_true"),
                t!("toggles.above_goal.timeseries_false"),
            )
        } else {
            (
                t!("toggles.above_goal.progress_title"),
                t!("toggles.above_goal.progress_true"),
                t!("toggles.above_goal.progress_false"),
            )
        };
        AlertSettingToggle {
            setting: AlertSetting::AlertAboveGoal,
            title: title.to_string(),
            true_text: true_text.to_string(),
            false_text: false_text.to_string(),
        }
    }
}

pub struct AlertFirstOnlyToggle;

impl AlertFirstOnlyToggle {
    pub fn for_timeseries(is_timeseries: bool) -> AlertSettingToggle {
        let title = if is_timeseries {
            t!("toggles.first_only.timeseries_title")
        } else {
            t!("toggles.first_only.progress_title")
        };
        AlertSettingToggle {
            setting: AlertSetting::AlertFirstOnly,
            title: title.to_string(),
            true_text: t!("toggles.first_only.true_text").to_string(),
            false_text: t!("toggles.first_only.false_text").to_string(),
        }
    }
}

/// The above-goal and first-only toggles of a goal alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertGoalToggles {
    pub alert_type: AlertType,
}

impl AlertGoalToggles {
    pub fn new(alert_type: AlertType) -> Self {
        Self { alert_type }
    }

    /// `None` for row alerts.
    pub fn toggles(&self, alert: &Alert) -> Option<[AlertSettingToggle; 2]> {
        if !self.alert_type.is_goal() || alert.alert_condition != AlertCondition::Goal {
            return None;
        }
        let is_timeseries = self.alert_type == AlertType::TimeseriesGoal;
        Some([
            AlertAboveGoalToggle::for_timeseries(is_timeseries),
            AlertFirstOnlyToggle::for_timeseries(is_timeseries),
        ])
    }

    pub fn render(&self, alert: &Alert) -> Option<Element> {
        let toggles = self.toggles(alert)?;
        Some(Element::section(
            "goal-toggles",
            toggles.iter().map(|toggle| toggle.render(alert)).collect(),
        ))
    }
}
