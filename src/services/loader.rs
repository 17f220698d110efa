use serde::Serialize;
use tracing::{debug, warn};

use super::api::PulseDirectory;
use crate::error::AlertError;
use crate::models::{FormInput, User};

/// State of data fetched asynchronously for a component.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Loadable<T> {
    #[default]
    NotLoaded,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn from_result(result: Result<T, AlertError>) -> Self {
        match result {
            Ok(value) => Loadable::Loaded(value),
            Err(e) => Loadable::Failed(e.user_message()),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Loadable::NotLoaded | Loadable::Loading)
    }
}

/// Channel options and the recipient directory used by the channel editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChannelDirectory {
    pub form_input: Loadable<FormInput>,
    pub users: Loadable<Vec<User>>,
}

impl ChannelDirectory {
    pub fn loading() -> Self {
        Self {
            form_input: Loadable::Loading,
            users: Loadable::Loading,
        }
    }

    /// Fetches both halves concurrently; each one fails on its own.
    pub async fn load(directory: &dyn PulseDirectory) -> Self {
        debug!("Loading channel options and user directory.");
        let (form_input, users) = tokio::join!(
            directory.fetch_pulse_form_input(),
            directory.fetch_users()
        );

        if let Err(e) = &form_input {
            warn!(error = %e, "Failed to load channel options.");
        }
        if let Err(e) = &users {
            warn!(error = %e, "Failed to load user directory.");
        }

        Self {
            form_input: Loadable::from_result(form_input),
            users: Loadable::from_result(users),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct HalfBroken;

    #[async_trait]
    impl PulseDirectory for HalfBroken {
        async fn fetch_pulse_form_input(&self) -> Result<FormInput, AlertError> {
            Ok(FormInput::default())
        }

        async fn fetch_users(&self) -> Result<Vec<User>, AlertError> {
            Err(AlertError::Api {
                status: 403,
                message: "You don't have permissions to do that.".to_string(),
            })
        }

        async fn fetch_current_user(&self) -> Result<User, AlertError> {
            Ok(User::with_id(1, "ada@example.com"))
        }
    }

    #[tokio::test]
    async fn halves_fail_independently() {
        let directory = ChannelDirectory::load(&HalfBroken).await;
        assert_eq!(directory.form_input, Loadable::Loaded(FormInput::default()));
        assert_eq!(
            directory.users,
            Loadable::Failed("You don't have permissions to do that.".to_string())
        );
    }

    #[test]
    fn pending_states() {
        let directory = ChannelDirectory::loading();
        assert!(directory.users.is_pending());
        assert!(ChannelDirectory::default().form_input.is_pending());
        assert_eq!(Loadable::Loaded(3).value(), Some(&3));
    }
}
