use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// A directory entry. Recipients added by address only have no `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
}

impl User {
    pub fn with_id(id: UserId, email: &str) -> Self {
        Self {
            id: Some(id),
            email: Some(email.to_string()),
            first_name: None,
            last_name: None,
            common_name: None,
            is_superuser: false,
        }
    }

    pub fn display_name(&self) -> String {
        if let Some(name) = &self.common_name {
            return name.clone();
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.email.clone().unwrap_or_default(),
        }
    }

    /// Key used to scope per-user client state such as the onboarding flag.
    pub fn identity_key(&self) -> String {
        match (self.id, &self.email) {
            (Some(id), _) => id.to_string(),
            (None, Some(email)) => email.to_lowercase(),
            (None, None) => "anonymous".to_string(),
        }
    }
}

/// The signed-in user looking at the modal.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewer {
    pub user: User,
    pub is_admin: bool,
}

impl Viewer {
    pub fn new(user: User) -> Self {
        let is_admin = user.is_superuser;
        Self { user, is_admin }
    }
}
