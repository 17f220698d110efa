use serde::{Deserialize, Serialize};

use super::alert::CardId;

/// Which kind of alert a saved question supports, decided by how it is visualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Rows,
    TimeseriesGoal,
    ProgressBarGoal,
}

impl AlertType {
    pub fn is_goal(&self) -> bool {
        matches!(self, AlertType::TimeseriesGoal | AlertType::ProgressBarGoal)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSettings {
    #[serde(rename = "graph.show_goal", default)]
    pub show_goal: bool,
    #[serde(rename = "graph.goal_value", default, skip_serializing_if = "Option::is_none")]
    pub goal_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: CardId,
    pub display: String,
    #[serde(default)]
    pub visualization_settings: VisualizationSettings,
}

impl Question {
    pub fn new(id: CardId, display: &str) -> Self {
        Self {
            id,
            display: display.to_string(),
            visualization_settings: VisualizationSettings::default(),
        }
    }

    pub fn with_goal(mut self) -> Self {
        self.visualization_settings.show_goal = true;
        self
    }

    pub fn alert_type(&self) -> AlertType {
        match self.display.as_str() {
            "progress" => AlertType::ProgressBarGoal,
            "line" | "area" | "bar" if self.visualization_settings.show_goal => {
                AlertType::TimeseriesGoal
            }
            _ => AlertType::Rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_type_follows_display() {
        assert_eq!(Question::new(1, "table").alert_type(), AlertType::Rows);
        assert_eq!(Question::new(1, "line").alert_type(), AlertType::Rows);
        assert_eq!(
            Question::new(1, "line").with_goal().alert_type(),
            AlertType::TimeseriesGoal
        );
        assert_eq!(
            Question::new(1, "progress").alert_type(),
            AlertType::ProgressBarGoal
        );
    }

    #[test]
    fn reads_dotted_setting_keys() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": 7,
            "display": "bar",
            "visualization_settings": { "graph.show_goal": true, "graph.goal_value": 100.0 }
        }))
        .unwrap();
        assert_eq!(question.alert_type(), AlertType::TimeseriesGoal);
        assert_eq!(question.visualization_settings.goal_value, Some(100.0));
    }
}
