use std::sync::Arc;
use tracing::{debug, info, warn};

use super::form::{AlertEditForm, FormEvent};
use super::intro::{AlertEducationalScreen, AlertModalTitle};
use super::modal::{modal_content, CloseCallback, ModalStatus};
use super::view::{Action, Element};
use crate::error::AlertError;
use crate::models::{Alert, Question, Viewer};
use crate::services::{AlertActions, ChannelDirectory, SplashFlagStore};

/// Modal for creating a new alert on a saved question.
pub struct CreateAlertModalContent {
    question: Question,
    viewer: Viewer,
    actions: Arc<dyn AlertActions>,
    flags: Arc<dyn SplashFlagStore>,
    on_close: CloseCallback,
    form: AlertEditForm,
    alert: Alert,
    has_seen_educational_screen: bool,
    status: ModalStatus,
}

impl CreateAlertModalContent {
    pub fn new(
        question: Question,
        viewer: Viewer,
        actions: Arc<dyn AlertActions>,
        flags: Arc<dyn SplashFlagStore>,
        directory: ChannelDirectory,
        on_close: CloseCallback,
    ) -> Self {
        let user_key = viewer.user.identity_key();
        let has_seen_educational_screen = match flags.has_seen_alert_splash(&user_key) {
            Ok(seen) => seen,
            Err(e) => {
                warn!(error = %e, user_key = %user_key, "Could not read alert splash flag; showing it.");
                false
            }
        };

        let alert_type = question.alert_type();
        let alert = Alert::new_draft(&question, &viewer.user);
        let form = AlertEditForm::new(alert_type, &viewer, directory);

        Self {
            question,
            viewer,
            actions,
            flags,
            on_close,
            form,
            alert,
            has_seen_educational_screen,
            status: ModalStatus::Editing,
        }
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn status(&self) -> &ModalStatus {
        &self.status
    }

    pub fn form(&self) -> &AlertEditForm {
        &self.form
    }

    pub fn shows_educational_screen(&self) -> bool {
        !self.has_seen_educational_screen
    }

    /// Dismisses the onboarding screen for good. The screen is hidden even if
    /// persisting the flag fails; the error is returned for display.
    pub fn proceed_from_educational_screen(&mut self) -> Result<(), AlertError> {
        if self.has_seen_educational_screen {
            return Ok(());
        }
        self.has_seen_educational_screen = true;
        self.flags
            .set_has_seen_alert_splash(&self.viewer.user.identity_key())
    }

    pub fn on_alert_change(&mut self, alert: Alert) {
        self.alert = alert;
    }

    pub fn handle(&mut self, event: FormEvent) -> Result<(), AlertError> {
        let next = self.form.apply(&self.alert, event)?;
        self.on_alert_change(next);
        Ok(())
    }

    /// Sends the draft to the create action. Closes only on success.
    pub async fn on_create_alert(&mut self) -> Result<Alert, AlertError> {
        if self.status.is_closed() {
            return Err(AlertError::ModalClosed);
        }

        self.status = ModalStatus::Submitting;
        match self.actions.create_alert(&self.alert).await {
            Ok(created) => {
                info!(alert_id = ?created.id, card_id = self.alert.card.id, "Alert creation submitted.");
                self.close();
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, card_id = self.alert.card.id, "Alert creation failed.");
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

    /// Dispatches a button press. Returns the created alert on submit.
    /// Submit is ignored while the onboarding screen is up.
    pub async fn handle_action(&mut self, action: Action) -> Result<Option<Alert>, AlertError> {
        match action {
            Action::Proceed => self.proceed_from_educational_screen().map(|_| None),
            Action::Submit if self.shows_educational_screen() => {
                debug!("Submit ignored while the onboarding screen is shown.");
                Ok(None)
            }
            Action::Submit => self.on_create_alert().await.map(Some),
            Action::Cancel => {
                self.close();
                Ok(None)
            }
            Action::OpenDelete | Action::ConfirmDelete => Ok(None),
        }
    }

    pub fn render(&self) -> Element {
        if self.shows_educational_screen() {
            return Element::section("ModalContent", vec![AlertEducationalScreen::render()]);
        }

        let mut body = vec![
            AlertModalTitle::render(&t!("modal.create_title")),
            self.form.render(&self.alert),
        ];
        body.extend(self.status.error_notice());
        body.push(Element::section(
            "flex ml-auto",
            vec![
                Element::button(t!("modal.cancel").to_string(), Action::Cancel),
                Element::primary_button(t!("modal.done").to_string(), Action::Submit),
            ],
        ));
        modal_content(body)
    }
}
