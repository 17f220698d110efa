use super::view::{rich, Element};
use crate::error::AlertError;
use crate::formatting::{format_hour, interpolate};
use crate::models::{AlertType, Schedule, ScheduleDay, ScheduleFrame, ScheduleType};

/// Frequencies an alert may be checked at.
pub const ALERT_SCHEDULE_OPTIONS: [ScheduleType; 3] =
    [ScheduleType::Hourly, ScheduleType::Daily, ScheduleType::Weekly];

const DEFAULT_HOUR: u8 = 8;

/// Frequency picker restricted to a list of schedule types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePicker {
    pub schedule_options: Vec<ScheduleType>,
    pub text_before_interval: String,
}

impl SchedulePicker {
    /// The picker alerts use: hourly, daily or weekly.
    pub fn for_alerts() -> Self {
        Self::new(
            &ALERT_SCHEDULE_OPTIONS,
            t!("schedule.text_before_interval").to_string(),
        )
    }

    pub fn new(schedule_options: &[ScheduleType], text_before_interval: impl Into<String>) -> Self {
        Self {
            schedule_options: schedule_options.to_vec(),
            text_before_interval: text_before_interval.into(),
        }
    }

    pub fn change_type(
        &self,
        schedule: &Schedule,
        schedule_type: ScheduleType,
    ) -> Result<Schedule, AlertError> {
        if !self.schedule_options.contains(&schedule_type) {
            return Err(AlertError::InvalidSchedule(format!(
                "'{}' is not one of the allowed frequencies",
                schedule_type.as_str()
            )));
        }

        let hour = schedule.schedule_hour.or(Some(DEFAULT_HOUR));
        let next = match schedule_type {
            ScheduleType::Hourly => Schedule {
                schedule_type,
                schedule_day: None,
                schedule_frame: None,
                schedule_hour: None,
            },
            ScheduleType::Daily => Schedule {
                schedule_type,
                schedule_day: None,
                schedule_frame: None,
                schedule_hour: hour,
            },
            ScheduleType::Weekly => Schedule {
                schedule_type,
                schedule_day: schedule.schedule_day.or(Some(ScheduleDay::Mon)),
                schedule_frame: None,
                schedule_hour: hour,
            },
            ScheduleType::Monthly => Schedule {
                schedule_type,
                schedule_day: schedule.schedule_day,
                schedule_frame: schedule.schedule_frame.or(Some(ScheduleFrame::First)),
                schedule_hour: hour,
            },
        };
        Ok(next)
    }

    /// Checks a schedule coming from outside the picker.
    ///
    /// A stale day on a daily schedule is accepted since the backend's own
    /// default alert schedule carries one.
    pub fn validate(&self, schedule: &Schedule) -> Result<(), AlertError> {
        if !self.schedule_options.contains(&schedule.schedule_type) {
            return Err(AlertError::InvalidSchedule(format!(
                "'{}' is not one of the allowed frequencies",
                schedule.schedule_type.as_str()
            )));
        }
        if let Some(hour) = schedule.schedule_hour {
            check_hour(hour)?;
        }
        match schedule.schedule_type {
            ScheduleType::Hourly if schedule.schedule_hour.is_some() => Err(
                AlertError::InvalidSchedule("hourly schedules have no hour".to_string()),
            ),
            ScheduleType::Weekly if schedule.schedule_day.is_none() => Err(
                AlertError::InvalidSchedule("weekly schedules need a day".to_string()),
            ),
            ScheduleType::Monthly => Ok(()),
            _ if schedule.schedule_frame.is_some() => Err(AlertError::InvalidSchedule(
                "only monthly schedules have a frame".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn change_hour(&self, schedule: &Schedule, hour: u8) -> Result<Schedule, AlertError> {
        check_hour(hour)?;
        if schedule.schedule_type == ScheduleType::Hourly {
            return Err(AlertError::InvalidSchedule(
                "hourly schedules have no hour".to_string(),
            ));
        }
        Ok(Schedule {
            schedule_hour: Some(hour),
            ..*schedule
        })
    }

    pub fn change_day(&self, schedule: &Schedule, day: ScheduleDay) -> Result<Schedule, AlertError> {
        if schedule.schedule_type != ScheduleType::Weekly {
            return Err(AlertError::InvalidSchedule(
                "only weekly schedules have a day".to_string(),
            ));
        }
        Ok(Schedule {
            schedule_day: Some(day),
            ..*schedule
        })
    }

    /// One-line summary such as "Check weekly on Monday at 8 AM".
    pub fn describe(&self, schedule: &Schedule) -> String {
        let time = format_hour(schedule.schedule_hour.unwrap_or(0));
        let mut args = vec![
            ("prefix", self.text_before_interval.clone()),
            ("time", time),
        ];
        let template = match schedule.schedule_type {
            ScheduleType::Hourly => t!("schedule.hourly"),
            ScheduleType::Daily => t!("schedule.daily"),
            ScheduleType::Weekly => {
                let day = schedule.schedule_day.unwrap_or(ScheduleDay::Mon);
                args.push(("day", day_name(day)));
                t!("schedule.weekly")
            }
            ScheduleType::Monthly => {
                let frame = match schedule.schedule_frame.unwrap_or(ScheduleFrame::First) {
                    ScheduleFrame::First => t!("schedule.frame.first"),
                    ScheduleFrame::Mid => t!("schedule.frame.mid"),
                    ScheduleFrame::Last => t!("schedule.frame.last"),
                };
                args.push(("frame", frame.to_string()));
                t!("schedule.monthly")
            }
        };
        interpolate(&template, &args)
    }

    pub fn render(&self, schedule: &Schedule) -> Element {
        Element::SchedulePicker {
            schedule: *schedule,
            schedule_options: self.schedule_options.clone(),
            text_before_interval: self.text_before_interval.clone(),
            description: self.describe(schedule),
        }
    }
}

fn day_name(day: ScheduleDay) -> String {
    match day {
        ScheduleDay::Sun => t!("schedule.day.sun"),
        ScheduleDay::Mon => t!("schedule.day.mon"),
        ScheduleDay::Tue => t!("schedule.day.tue"),
        ScheduleDay::Wed => t!("schedule.day.wed"),
        ScheduleDay::Thu => t!("schedule.day.thu"),
        ScheduleDay::Fri => t!("schedule.day.fri"),
        ScheduleDay::Sat => t!("schedule.day.sat"),
    }
    .to_string()
}

fn check_hour(hour: u8) -> Result<(), AlertError> {
    if hour > 23 {
        return Err(AlertError::InvalidSchedule(format!(
            "hour {hour} is outside 0..=23"
        )));
    }
    Ok(())
}

pub struct RawDataAlertTip;

impl RawDataAlertTip {
    pub fn render() -> Element {
        Element::Tip {
            icon: "lightbulb".to_string(),
            content: rich(&t!("schedule.tip"), &[]),
        }
    }
}

/// Schedule section of the alert form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEditSchedule {
    pub alert_type: AlertType,
    pub picker: SchedulePicker,
}

impl AlertEditSchedule {
    pub fn new(alert_type: AlertType) -> Self {
        Self {
            alert_type,
            picker: SchedulePicker::for_alerts(),
        }
    }

    pub fn render(&self, schedule: &Schedule) -> Element {
        let mut body = Vec::new();
        if self.alert_type == AlertType::Rows {
            body.push(RawDataAlertTip::render());
        }
        body.push(Element::section("p3 bg-grey-0", vec![self.picker.render(schedule)]));

        Element::section(
            "alert-edit-schedule",
            vec![
                Element::heading(3, t!("schedule.heading").to_string()),
                Element::section("bordered rounded mb2", body),
            ],
        )
    }
}
