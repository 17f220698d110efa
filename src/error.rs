use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("Alert has no id")]
    MissingAlertId,
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Modal is already closed")]
    ModalClosed,
}

impl AlertError {
    /// Message suitable for an inline error notice.
    pub fn user_message(&self) -> String {
        match self {
            AlertError::Api { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_backend_message() {
        let err = AlertError::Api {
            status: 400,
            message: "Card is archived".to_string(),
        };
        assert_eq!(err.user_message(), "Card is archived");

        let empty = AlertError::Api {
            status: 502,
            message: String::new(),
        };
        assert_eq!(empty.user_message(), "API error (502): ");
    }

    #[test]
    fn plain_variants_use_display() {
        assert_eq!(AlertError::MissingAlertId.user_message(), "Alert has no id");
    }
}
