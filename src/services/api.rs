use async_trait::async_trait;

use crate::error::AlertError;
use crate::models::{Alert, AlertId, FormInput, User};

/// Persistence actions for alerts. Implementations talk to the backend.
#[async_trait]
pub trait AlertActions: Send + Sync {
    async fn create_alert(&self, alert: &Alert) -> Result<Alert, AlertError>;

    async fn update_alert(&self, alert: &Alert) -> Result<Alert, AlertError>;

    async fn delete_alert(&self, alert_id: AlertId) -> Result<(), AlertError>;
}

/// Directory data the channel editor needs: channel options and users.
#[async_trait]
pub trait PulseDirectory: Send + Sync {
    async fn fetch_pulse_form_input(&self) -> Result<FormInput, AlertError>;

    async fn fetch_users(&self) -> Result<Vec<User>, AlertError>;

    async fn fetch_current_user(&self) -> Result<User, AlertError>;
}
