//! Process configuration, read once at startup and passed down explicitly.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::documents::common::get_templates_dir;
use crate::documents::DocumentDefaults;

pub const DEFAULT_ORGANIZATION_NAME: &str = "Your Company";
pub const DEFAULT_JURISDICTION: &str = "US-CA";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 60;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings for the text-generation service.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai: OpenAiConfig,
    pub defaults: DocumentDefaults,
    pub templates_dir: PathBuf,
    pub export_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Build from the process environment. Call `dotenvy::dotenv()` beforehand to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout_secs = match get("OPENAI_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "OPENAI_TIMEOUT_SECS",
                    value: raw,
                    expected: "number of seconds",
                })?,
            None => DEFAULT_OPENAI_TIMEOUT_SECS,
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "PORT",
                    value: raw,
                    expected: "port number",
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            openai: OpenAiConfig {
                api_key: get("OPENAI_API_KEY"),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
                base_url: get("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                timeout_secs,
            },
            defaults: DocumentDefaults {
                organization_name: get("ORGANIZATION_NAME")
                    .unwrap_or_else(|| DEFAULT_ORGANIZATION_NAME.to_string()),
                jurisdiction: get("DEFAULT_JURISDICTION")
                    .unwrap_or_else(|| DEFAULT_JURISDICTION.to_string()),
            },
            templates_dir: get("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| get_templates_dir().to_path_buf()),
            export_dir: get("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join("legaldraft-exports")),
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// Log settings a deployer likely wants to know about.
    pub fn log_startup_warnings(&self) {
        if self.openai.api_key.is_none() {
            log::warn!(
                "OPENAI_API_KEY not set; enhancement is disabled and documents are returned unenhanced"
            );
        }
    }
}
