use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::api::{AlertActions, PulseDirectory};
use crate::config::ClientConfig;
use crate::error::AlertError;
use crate::models::{Alert, AlertId, FormInput, User};
use crate::version::user_agent;

const SESSION_HEADER: &str = "X-Metabase-Session";

/// HTTP client for the alert, pulse and user endpoints.
pub struct MetabaseClient {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

/// `/api/user` answers either with a bare list or with a paginated envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserListResponse {
    Plain(Vec<User>),
    Paged { data: Vec<User> },
}

impl MetabaseClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AlertError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(user_agent())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_token: config.session_token.clone(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.session_token {
            Some(token) => builder.header(SESSION_HEADER, token),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response, AlertError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        Err(AlertError::Api {
            status: status.as_u16(),
            message: extract_error_message(&body),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AlertError> {
        debug!(path, "GET");
        let response = self.request(Method::GET, path).send().await?;
        Ok(Self::check(response).await?.json::<T>().await?)
    }
}

/// Pulls a human-readable message out of an error body, falling back to the raw text.
fn extract_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error: Some(error), ..
        }) => error,
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl AlertActions for MetabaseClient {
    async fn create_alert(&self, alert: &Alert) -> Result<Alert, AlertError> {
        let response = self.request(Method::POST, "api/alert").json(alert).send().await?;
        let created: Alert = Self::check(response).await?.json().await?;
        info!(alert_id = ?created.id, card_id = created.card.id, "Alert created.");
        Ok(created)
    }

    async fn update_alert(&self, alert: &Alert) -> Result<Alert, AlertError> {
        let alert_id = alert.id.ok_or(AlertError::MissingAlertId)?;
        let response = self
            .request(Method::PUT, &format!("api/alert/{alert_id}"))
            .json(alert)
            .send()
            .await?;
        let updated: Alert = Self::check(response).await?.json().await?;
        info!(alert_id, "Alert updated.");
        Ok(updated)
    }

    async fn delete_alert(&self, alert_id: AlertId) -> Result<(), AlertError> {
        let response = self
            .request(Method::DELETE, &format!("api/alert/{alert_id}"))
            .send()
            .await?;
        Self::check(response).await?;
        info!(alert_id, "Alert deleted.");
        Ok(())
    }
}

#[async_trait]
impl PulseDirectory for MetabaseClient {
    async fn fetch_pulse_form_input(&self) -> Result<FormInput, AlertError> {
        self.get_json("api/pulse/form_input").await
    }

    async fn fetch_users(&self) -> Result<Vec<User>, AlertError> {
        let users = match self.get_json::<UserListResponse>("api/user").await? {
            UserListResponse::Plain(users) => users,
            UserListResponse::Paged { data } => data,
        };
        if users.is_empty() {
            warn!("User directory is empty.");
        }
        Ok(users)
    }

    async fn fetch_current_user(&self) -> Result<User, AlertError> {
        self.get_json("api/user/current").await
    }
}
