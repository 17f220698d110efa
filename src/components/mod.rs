pub mod channels;
pub mod create;
pub mod delete;
pub mod form;
pub mod intro;
pub mod modal;
pub mod schedule;
pub mod toggles;
pub mod update;
pub mod view;

pub use channels::AlertEditChannels;
pub use create::CreateAlertModalContent;
pub use delete::DeleteAlertSection;
pub use form::{AlertEditForm, FormEvent};
pub use intro::{AlertEducationalScreen, AlertModalTitle};
pub use modal::{CloseCallback, ModalStatus};
pub use schedule::{AlertEditSchedule, RawDataAlertTip, SchedulePicker, ALERT_SCHEDULE_OPTIONS};
pub use toggles::{AlertAboveGoalToggle, AlertFirstOnlyToggle, AlertGoalToggles, AlertSettingToggle};
pub use update::{UpdateAlertModalContent, UpdateOutcome};
pub use view::{Action, Element, Inline};
