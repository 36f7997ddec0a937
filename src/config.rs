//! Backend configuration.
//!
//! Values come from an optional JSON settings file and from environment
//! variables; a variable that is set always wins over the file.

use crate::environment::Profile;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Could not read settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings file contents. Every key is optional; keys mirror the environment
/// variable names in lowercase.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FileSettings {
    pub secret_key: Option<String>,
    pub session_timeout_hours: Option<u64>,
    pub prism_ip: Option<String>,
    pub prism_username: Option<String>,
    pub prism_password: Option<String>,
    pub prism_verify_tls: Option<bool>,
    pub dashboard_username: Option<String>,
    pub dashboard_password: Option<String>,
    pub api_timeout: Option<u64>,
    pub cluster_cache_ttl: Option<u64>,
    pub console_base_url: Option<String>,
    pub static_dir: Option<String>,
    pub dashboard_env: Option<String>,
}

impl FileSettings {
    /// Loads settings from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let settings: FileSettings = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(settings)
    }

    fn text(&self, key: &str) -> Option<String> {
        match key {
            "SECRET_KEY" => self.secret_key.clone(),
            "PRISM_IP" => self.prism_ip.clone(),
            "PRISM_USERNAME" => self.prism_username.clone(),
            "PRISM_PASSWORD" => self.prism_password.clone(),
            "DASHBOARD_USERNAME" => self.dashboard_username.clone(),
            "DASHBOARD_PASSWORD" => self.dashboard_password.clone(),
            "CONSOLE_BASE_URL" => self.console_base_url.clone(),
            "STATIC_DIR" => self.static_dir.clone(),
            "DASHBOARD_ENV" => self.dashboard_env.clone(),
            "SESSION_TIMEOUT_HOURS" => self.session_timeout_hours.map(|v| v.to_string()),
            "API_TIMEOUT" => self.api_timeout.map(|v| v.to_string()),
            "CLUSTER_CACHE_TTL" => self.cluster_cache_ttl.map(|v| v.to_string()),
            "PRISM_VERIFY_TLS" => self.prism_verify_tls.map(|v| v.to_string()),
            _ => None,
        }
    }
}

/// Connection to Prism Central.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrismSettings {
    pub host: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
    /// Lab deployments run with self-signed certificates, hence off by default.
    pub verify_tls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub profile: Profile,
    pub secret_key: String,
    pub session_lifetime: Duration,
    pub prism: PrismSettings,
    pub dashboard_username: String,
    pub dashboard_password: String,
    pub cluster_cache_ttl: Duration,
    pub console_base_url: String,
    pub static_dir: String,
}

const REQUIRED: [&str; 6] = [
    "SECRET_KEY",
    "DASHBOARD_USERNAME",
    "DASHBOARD_PASSWORD",
    "PRISM_IP",
    "PRISM_USERNAME",
    "PRISM_PASSWORD",
];

const DEFAULT_SESSION_TIMEOUT_HOURS: u64 = 12;
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CLUSTER_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CONSOLE_BASE_URL: &str = "https://ntnxlab.ddns.net:8443";
const DEFAULT_STATIC_DIR: &str = "static";

impl ServerConfig {
    /// Reads the process environment, layered over `file` when given.
    pub fn from_env(file: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match file {
            Some(path) => FileSettings::load_from_file(path)?,
            None => FileSettings::default(),
        };
        Self::resolve(&settings, |key| std::env::var(key).ok())
    }

    /// Builds the configuration from `settings` and a variable lookup.
    pub fn resolve(
        settings: &FileSettings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .or_else(|| settings.text(key))
                .filter(|value| !value.trim().is_empty())
        };
        validate(&get)?;

        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(vec![key]));
        let number = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match get(key) {
                Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        key,
                        reason: e.to_string(),
                    }
                }),
                None => Ok(default),
            }
        };

        let profile = match get("DASHBOARD_ENV") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "DASHBOARD_ENV",
                reason: format!("unknown profile {raw:?}"),
            })?,
            None => Profile::default(),
        };
        let verify_tls = match get("PRISM_VERIFY_TLS") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                key: "PRISM_VERIFY_TLS",
                reason: format!("expected true or false, got {raw:?}"),
            })?,
            None => false,
        };

        let session_secs = number("SESSION_TIMEOUT_HOURS", DEFAULT_SESSION_TIMEOUT_HOURS)?
            .checked_mul(3600)
            .ok_or(ConfigError::Invalid {
                key: "SESSION_TIMEOUT_HOURS",
                reason: "session lifetime out of range".to_string(),
            })?;

        Ok(Self {
            profile,
            secret_key: required("SECRET_KEY")?,
            session_lifetime: Duration::from_secs(session_secs),
            prism: PrismSettings {
                host: required("PRISM_IP")?,
                username: required("PRISM_USERNAME")?,
                password: required("PRISM_PASSWORD")?,
                timeout: Duration::from_secs(number("API_TIMEOUT", DEFAULT_API_TIMEOUT_SECS)?),
                verify_tls,
            },
            dashboard_username: required("DASHBOARD_USERNAME")?,
            dashboard_password: required("DASHBOARD_PASSWORD")?,
            cluster_cache_ttl: Duration::from_secs(number(
                "CLUSTER_CACHE_TTL",
                DEFAULT_CLUSTER_CACHE_TTL_SECS,
            )?),
            console_base_url: get("CONSOLE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CONSOLE_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }
}

/// Reports every required key that has no value.
fn validate(get: &impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
    let missing: Vec<&'static str> = REQUIRED
        .iter()
        .copied()
        .filter(|key| get(key).is_none())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Missing(missing))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
