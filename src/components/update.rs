use std::sync::Arc;
use tracing::{info, warn};

use super::delete::DeleteAlertSection;
use super::form::{AlertEditForm, FormEvent};
use super::intro::AlertModalTitle;
use super::modal::{modal_content, CloseCallback, ModalStatus};
use super::view::{Action, Element};
use crate::error::AlertError;
use crate::models::{Alert, AlertType, Viewer};
use crate::services::{AlertActions, ChannelDirectory};

/// What a dispatched action on the edit modal produced.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Nothing,
    Updated(Alert),
    Deleted,
}

/// Modal for editing an existing alert.
pub struct UpdateAlertModalContent {
    alert: Alert,
    modified_alert: Alert,
    viewer: Viewer,
    actions: Arc<dyn AlertActions>,
    on_close: CloseCallback,
    form: AlertEditForm,
    delete_section: Option<DeleteAlertSection>,
    status: ModalStatus,
}

impl UpdateAlertModalContent {
    pub fn new(
        alert: Alert,
        alert_type: AlertType,
        viewer: Viewer,
        actions: Arc<dyn AlertActions>,
        directory: ChannelDirectory,
        on_close: CloseCallback,
    ) -> Self {
        let form = AlertEditForm::new(alert_type, &viewer, directory);
        let delete_section = viewer
            .is_admin
            .then(|| DeleteAlertSection::new(alert.clone()));
        Self {
            modified_alert: alert.clone(),
            alert,
            viewer,
            actions,
            on_close,
            form,
            delete_section,
            status: ModalStatus::Editing,
        }
    }

    /// The draft being edited.
    pub fn alert(&self) -> &Alert {
        &self.modified_alert
    }

    pub fn original_alert(&self) -> &Alert {
        &self.alert
    }

    pub fn status(&self) -> &ModalStatus {
        &self.status
    }

    pub fn form(&self) -> &AlertEditForm {
        &self.form
    }

    pub fn delete_section(&self) -> Option<&DeleteAlertSection> {
        self.delete_section.as_ref()
    }

    pub fn on_alert_change(&mut self, modified_alert: Alert) {
        self.modified_alert = modified_alert;
    }

    pub fn handle(&mut self, event: FormEvent) -> Result<(), AlertError> {
        let next = self.form.apply(&self.modified_alert, event)?;
        self.on_alert_change(next);
        Ok(())
    }

    pub async fn on_update_alert(&mut self) -> Result<Alert, AlertError> {
        if self.status.is_closed() {
            return Err(AlertError::ModalClosed);
        }

        self.status = ModalStatus::Submitting;
        match self.actions.update_alert(&self.modified_alert).await {
            Ok(updated) => {
                info!(alert_id = ?updated.id, "Alert update submitted.");
                self.close();
                Ok(updated)
            }
            Err(e) => {
                warn!(error = %e, alert_id = ?self.alert.id, "Alert update failed.");
                self.status = ModalStatus::Failed(e.user_message());
                Err(e)
            }
        }
    }

    /// Deletes the alert as it was when the modal opened. Administrators only.
    pub async fn on_delete_alert(&mut self) -> Result<(), AlertError> {
        if self.status.is_closed() {
            return Err(AlertError::ModalClosed);
        }
        if !self.viewer.is_admin {
            return Err(AlertError::PermissionDenied);
        }
        let alert_id = self.alert.id.ok_or(AlertError::MissingAlertId)?;

        self.status = ModalStatus::Submitting;
        match self.actions.delete_alert(alert_id).await {
            Ok(()) => {
                info!(alert_id, "Alert deletion submitted.");
                self.close();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, alert_id, "Alert deletion failed.");
                self.status = ModalStatus::Failed(e.user_message());
                Err(e)
            }
        }
    }

    pub fn close(&mut self) {
        if self.status.is_closed() {
            return;
        }
        self.status = ModalStatus::Closed;
        (self.on_close)();
    }

    pub async fn handle_action(&mut self, action: Action) -> Result<UpdateOutcome, AlertError> {
        match action {
            Action::Submit => self.on_update_alert().await.map(UpdateOutcome::Updated),
            Action::ConfirmDelete => self.on_delete_alert().await.map(|_| UpdateOutcome::Deleted),
            Action::Cancel => {
                self.close();
                Ok(UpdateOutcome::Nothing)
            }
            _ => Ok(UpdateOutcome::Nothing),
        }
    }

    pub fn render(&self) -> Element {
        let mut body = vec![
            AlertModalTitle::render(&t!("modal.edit_title")),
            self.form.render(&self.modified_alert),
        ];
        if let Some(section) = &self.delete_section {
            body.push(section.render());
        }
        body.extend(self.status.error_notice());
        body.push(Element::section(
            "flex ml-auto",
            vec![
                Element::button(t!("modal.cancel").to_string(), Action::Cancel),
                Element::primary_button(t!("modal.save_changes").to_string(), Action::Submit),
            ],
        ));
        modal_content(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertId, Question, Schedule, ScheduleType, User};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingActions {
        updated: Mutex<Vec<Alert>>,
        deleted: Mutex<Vec<AlertId>>,
        fail_delete: bool,
    }

    #[async_trait]
    impl AlertActions for RecordingActions {
        async fn create_alert(&self, alert: &Alert) -> Result<Alert, AlertError> {
            Ok(alert.clone())
        }

        async fn update_alert(&self, alert: &Alert) -> Result<Alert, AlertError> {
            self.updated.lock().unwrap().push(alert.clone());
            Ok(alert.clone())
        }

        async fn delete_alert(&self, alert_id: AlertId) -> Result<(), AlertError> {
            self.deleted.lock().unwrap().push(alert_id);
            if self.fail_delete {
                return Err(AlertError::Api {
                    status: 404,
                    message: "Not found.".to_string(),
                });
            }
            Ok(())
        }
    }

    fn saved_alert() -> Alert {
        let mut alert = Alert::new_draft(
            &Question::new(3, "table"),
            &User::with_id(1, "ada@example.com"),
        );
        alert.id = Some(17);
        alert
    }

    fn viewer(is_admin: bool) -> Viewer {
        Viewer {
            user: User::with_id(1, "ada@example.com"),
            is_admin,
        }
    }

    fn open(
        alert: Alert,
        is_admin: bool,
        actions: Arc<RecordingActions>,
    ) -> (UpdateAlertModalContent, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        let handle = closes.clone();
        let modal = UpdateAlertModalContent::new(
            alert,
            AlertType::Rows,
            viewer(is_admin),
            actions,
            ChannelDirectory::default(),
            Box::new(move || {
                handle.fetch_add(1, Ordering::SeqCst);
            }),
        );
        (modal, closes)
    }

    #[tokio::test]
    async fn update_sends_modified_draft_then_closes() {
        let actions = Arc::new(RecordingActions::default());
        let (mut modal, closes) = open(saved_alert(), false, actions.clone());

        let hourly = Schedule {
            schedule_type: ScheduleType::Hourly,
            ..Schedule::default()
        };
        modal.handle(FormEvent::SetSchedule(hourly)).unwrap();
        let draft = modal.alert().clone();
        assert_ne!(&draft, modal.original_alert());

        let outcome = modal.handle_action(Action::Submit).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated(draft.clone()));
        assert_eq!(*actions.updated.lock().unwrap(), vec![draft]);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delete_sends_original_id_for_admins() {
        let actions = Arc::new(RecordingActions::default());
        let (mut modal, closes) = open(saved_alert(), true, actions.clone());
        assert!(modal.delete_section().is_some());

        let outcome = modal.handle_action(Action::ConfirmDelete).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Deleted);
        assert_eq!(*actions.deleted.lock().unwrap(), vec![17]);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_admins_cannot_delete() {
        let actions = Arc::new(RecordingActions::default());
        let (mut modal, closes) = open(saved_alert(), false, actions.clone());
        assert!(modal.delete_section().is_none());
        assert!(modal
            .render()
            .find_all(|e| matches!(e, Element::ConfirmDialog { .. }))
            .is_empty());

        assert!(matches!(
            modal.on_delete_alert().await,
            Err(AlertError::PermissionDenied)
        ));
        assert!(actions.deleted.lock().unwrap().is_empty());
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsaved_alert_cannot_be_deleted() {
        let mut alert = saved_alert();
        alert.id = None;
        let (mut modal, _) = open(alert, true, Arc::default());
        assert!(matches!(
            modal.on_delete_alert().await,
            Err(AlertError::MissingAlertId)
        ));
    }

    #[tokio::test]
    async fn failed_delete_surfaces_error() {
        let actions = Arc::new(RecordingActions {
            fail_delete: true,
            ..Default::default()
        });
        let (mut modal, closes) = open(saved_alert(), true, actions);

        assert!(modal.handle_action(Action::ConfirmDelete).await.is_err());
        assert_eq!(closes.load(Ordering::SeqCst), 0);
        assert_eq!(modal.status(), &ModalStatus::Failed("Not found.".to_string()));
    }

    #[tokio::test]
    async fn only_confirm_deletes() {
        let actions = Arc::new(RecordingActions::default());
        let (mut modal, closes) = open(saved_alert(), true, actions.clone());
        let outcome = modal.handle_action(Action::OpenDelete).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Nothing);
        assert!(actions.deleted.lock().unwrap().is_empty());
        assert_eq!(closes.load(Ordering::SeqCst), 0);

        let outcome = modal.handle_action(Action::Cancel).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Nothing);
        assert!(actions.deleted.lock().unwrap().is_empty());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
