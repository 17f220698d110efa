use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::AlertError;

const ENV_PREFIX: &str = "ALERTS_";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value sent as `X-Metabase-Session`. Requests go out unauthenticated without it.
    #[serde(default)]
    pub session_token: Option<String>,

    #[serde(default = "default_flag_store_path")]
    pub flag_store_path: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialClientConfig {
    base_url: Option<String>,
    session_token: Option<String>,
    flag_store_path: Option<String>,
    log_dir: Option<String>,
    request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_flag_store_path() -> String {
    "data/alert_flags.json".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_token: None,
            flag_store_path: default_flag_store_path(),
            log_dir: default_log_dir(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Reads the optional TOML file, then `ALERTS_*` variables (after `.env`).
    /// Environment values win over the file.
    pub fn load(config_path: Option<&str>) -> Result<Self, AlertError> {
        dotenv::dotenv().ok();

        let file_config = match config_path {
            Some(path_str) => Self::read_file(Path::new(path_str))?,
            None => PartialClientConfig::default(),
        };

        let env_config = envy::prefixed(ENV_PREFIX)
            .from_env::<PartialClientConfig>()
            .map_err(|e| AlertError::Config(format!("Failed to load config from environment: {e}")))?;

        Self::merge(env_config, file_config)
    }

    fn read_file(path: &Path) -> Result<PartialClientConfig, AlertError> {
        if !path.exists() {
            return Ok(PartialClientConfig::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| {
            AlertError::Config(format!("Failed to read config file at {path:?}: {e}"))
        })?;
        toml::from_str(&contents).map_err(|e| {
            AlertError::Config(format!("Failed to parse TOML from config file at {path:?}: {e}"))
        })
    }

    fn merge(
        env_config: PartialClientConfig,
        file_config: PartialClientConfig,
    ) -> Result<Self, AlertError> {
        let config = ClientConfig {
            base_url: env_config
                .base_url
                .or(file_config.base_url)
                .unwrap_or_else(default_base_url),
            session_token: env_config
                .session_token
                .or(file_config.session_token)
                .filter(|token| !token.trim().is_empty()),
            flag_store_path: env_config
                .flag_store_path
                .or(file_config.flag_store_path)
                .unwrap_or_else(default_flag_store_path),
            log_dir: env_config
                .log_dir
                .or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
            request_timeout_secs: env_config
                .request_timeout_secs
                .or(file_config.request_timeout_secs)
                .unwrap_or_else(default_request_timeout_secs),
        };

        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(AlertError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                config.base_url
            )));
        }
        if config.request_timeout_secs == 0 {
            return Err(AlertError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(config)
    }
}
