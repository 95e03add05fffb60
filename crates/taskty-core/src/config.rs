//! Application Configuration
//!
//! JSON document embedded into the frontend at build time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("firebase config is missing `{0}`")]
    MissingField(&'static str),
    #[error("listLimit must be greater than zero")]
    InvalidListLimit,
    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}

/// Firebase web app settings, serialized as-is for `initializeApp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,
    pub app_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

impl FirebaseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("apiKey", &self.api_key),
            ("authDomain", &self.auth_domain),
            ("projectId", &self.project_id),
            ("appId", &self.app_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    Firebase(FirebaseConfig),
    /// Offline demo; nothing leaves the page
    Memory,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub backend: BackendConfig,
    #[serde(default = "default_tasks_collection")]
    pub tasks_collection: String,
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_tasks_collection() -> String {
    "tasks".to_string()
}

fn default_list_limit() -> usize {
    crate::controllers::DEFAULT_LIST_LIMIT
}

fn default_message_timeout_ms() -> u32 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::Memory,
            tasks_collection: default_tasks_collection(),
            list_limit: default_list_limit(),
            message_timeout_ms: default_message_timeout_ms(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.list_limit == 0 {
            return Err(ConfigError::InvalidListLimit);
        }
        self.log_level()?;
        if let BackendConfig::Firebase(firebase) = &self.backend {
            firebase.validate()?;
        }
        Ok(())
    }
}
