pub mod alert;
pub mod channel;
pub mod form_input;
pub mod question;
pub mod schedule;
pub mod user;

pub use alert::{Alert, AlertCondition, AlertId, AlertSetting, Card, CardId};
pub use channel::{Channel, ChannelType};
pub use form_input::{ChannelField, ChannelSpec, FormInput};
pub use question::{AlertType, Question, VisualizationSettings};
pub use schedule::{Schedule, ScheduleDay, ScheduleFrame, ScheduleType};
pub use user::{User, UserId, Viewer};
