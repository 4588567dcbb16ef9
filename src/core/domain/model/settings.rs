//! Integration settings as supplied by the host platform.
//!
//! Keys match the platform's configuration block (`crafty_base_url`,
//! `api_token`, `verify_ssl`) so the same TOML can be reused verbatim.

use crate::core::domain::{
    error::{CraftyError, CraftyResult, ValidationError},
    model::credentials::Credentials,
    value_object::{
        CraftyApiToken, CraftyBaseUrl, DEFAULT_BASE_URL, validate_api_token, validate_base_url,
    },
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default prefix for metric unique ids.
pub const DEFAULT_ENTITY_PREFIX: &str = "crafty";

/// Client-side request throttling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_base_url")]
    pub crafty_base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
    #[serde(default = "default_entity_prefix")]
    pub entity_prefix: String,
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_verify_ssl() -> bool {
    true
}

fn default_entity_prefix() -> String {
    DEFAULT_ENTITY_PREFIX.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            crafty_base_url: default_base_url(),
            api_token: None,
            verify_ssl: default_verify_ssl(),
            entity_prefix: default_entity_prefix(),
            rate_limit: None,
        }
    }
}

impl Settings {
    /// Parses settings from a TOML document.
    ///
    /// # Errors
    /// Returns `CraftyError::Config` if the document is not valid TOML or has
    /// wrongly typed keys.
    pub fn from_toml_str(input: &str) -> CraftyResult<Self> {
        toml::from_str(input)
            .map_err(|e| CraftyError::Config(format!("Invalid settings file: {}", e)))
    }

    /// Reads and parses a TOML settings file.
    ///
    /// # Errors
    /// Returns `CraftyError::Config` if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> CraftyResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            CraftyError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Builds settings from `CRAFTY_*` environment variables.
    ///
    /// # Errors
    /// Returns `CraftyError::Validation` if `CRAFTY_VERIFY_SSL` is not a boolean.
    pub fn from_env() -> CraftyResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> CraftyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(url) = lookup("CRAFTY_BASE_URL") {
            settings.crafty_base_url = url;
        }
        settings.api_token = lookup("CRAFTY_API_TOKEN");
        if let Some(raw) = lookup("CRAFTY_VERIFY_SSL") {
            settings.verify_ssl = parse_bool("CRAFTY_VERIFY_SSL", &raw)?;
        }
        if let Some(prefix) = lookup("CRAFTY_ENTITY_PREFIX") {
            settings.entity_prefix = prefix;
        }
        Ok(settings)
    }

    /// Validates the settings and produces the shared credentials.
    ///
    /// # Errors
    /// * `CraftyError::Config` if no usable API token is configured
    /// * `CraftyError::Validation` if the base URL, prefix or rate limit is invalid
    pub fn credentials(&self) -> CraftyResult<Credentials> {
        let token = self
            .api_token
            .as_deref()
            .filter(|token| validate_api_token(token).is_ok())
            .ok_or_else(|| {
                CraftyError::Config(
                    "No API token found for Crafty Controller integration".to_string(),
                )
            })?;

        validate_base_url(&self.crafty_base_url)?;
        if self.entity_prefix.trim().is_empty() {
            return Err(ValidationError::Field {
                field: "entity_prefix".to_string(),
                message: "Entity prefix cannot be empty".to_string(),
            }
            .into());
        }
        if let Some(rate_limit) = self.rate_limit {
            validate_rate_limit(&rate_limit)?;
        }

        Ok(Credentials::new(
            CraftyBaseUrl::new(self.crafty_base_url.as_str())?,
            CraftyApiToken::new(token)?,
            self.verify_ssl,
        ))
    }
}

fn validate_rate_limit(rate_limit: &RateLimitConfig) -> Result<(), ValidationError> {
    if rate_limit.requests_per_second == 0 || rate_limit.burst_size == 0 {
        return Err(ValidationError::Field {
            field: "rate_limit".to_string(),
            message: "requests_per_second and burst_size must be greater than zero".to_string(),
        });
    }
    Ok(())
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ValidationError::Field {
            field: field.to_string(),
            message: format!("'{}' is not a boolean", other),
        }),
    }
}
