use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default API endpoint. Override [`Config::base_url`] for the EU region
/// (`https://api.eu.mailgun.net/v3`) or to point at a test double.
pub const DEFAULT_BASE_URL: &str = "https://api.mailgun.net/v3";

/// A configuration value: either a literal, or the name of an environment
/// variable to read when the delivery call is made (not at load time).
///
/// Deserializes from a bare string (literal) or an `{ "env": "NAME" }` map
/// (indirection), so configs can be loaded from application settings files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Literal(String),
    Env { env: String },
}

impl ConfigValue {
    pub fn literal(value: impl Into<String>) -> Self {
        ConfigValue::Literal(value.into())
    }

    pub fn env(name: impl Into<String>) -> Self {
        ConfigValue::Env { env: name.into() }
    }

    /// Current value, or `None` when missing or empty after resolution.
    fn resolve(&self) -> Option<String> {
        let value = match self {
            ConfigValue::Literal(value) => Some(value.clone()),
            ConfigValue::Env { env } => env::var(env).ok(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::literal(value)
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Literal(value)
    }
}

/// Raw adapter configuration, resolved once per delivery call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: ConfigValue,
    pub domain: ConfigValue,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Config {
    pub fn new(api_key: impl Into<ConfigValue>, domain: impl Into<ConfigValue>) -> Self {
        Self { api_key: api_key.into(), domain: domain.into(), base_url: None }
    }

    /// Override the API endpoint (EU region, test double).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Resolve literals and environment indirections. Fails fast when a
    /// required setting is missing or empty; pure read, no retries.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let api_key = self.api_key.resolve().ok_or_else(|| self.missing("api_key"))?;
        let domain = self.domain.resolve().ok_or_else(|| self.missing("domain"))?;
        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(ResolvedConfig { api_key, domain, base_url })
    }

    fn missing(&self, setting: &'static str) -> ConfigError {
        ConfigError::Missing { setting, config: format!("{:?}", self) }
    }
}

/// Settings after resolution; `api_key` and `domain` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub domain: String,
    pub base_url: String,
}

/// A required setting was missing or empty after resolving literals and
/// environment indirections. Unrecoverable precondition; the full raw config
/// is echoed for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Mailgun setting `{setting}` is missing or empty (config: {config})")]
    Missing { setting: &'static str, config: String },
}
