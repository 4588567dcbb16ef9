use crate::core::domain::error::ValidationError;

/// Default location of a local Crafty Controller install.
pub const DEFAULT_BASE_URL: &str = "https://localhost:8000";

/// The root URL of a Crafty Controller instance, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftyBaseUrl {
    value: String,
}

impl CraftyBaseUrl {
    /// Validates and normalizes a base URL.
    ///
    /// Trailing slashes are stripped so that endpoint paths can be appended
    /// verbatim.
    ///
    /// # Errors
    /// Returns `ValidationError` if the URL is empty, does not parse, or is not
    /// `http`/`https`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_base_url(&value)?;
        Ok(Self::new_unchecked(value))
    }

    /// Creates a base URL without validation (trailing slashes are still stripped).
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the normalized URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Joins an API path onto the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.value, path.trim_start_matches('/'))
    }
}

impl Default for CraftyBaseUrl {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_BASE_URL)
    }
}

impl std::fmt::Display for CraftyBaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Validates that a string is a usable http(s) base URL.
pub(crate) fn validate_base_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Field {
            field: "crafty_base_url".to_string(),
            message: "Base URL cannot be empty".to_string(),
        });
    }
    let parsed = url::Url::parse(value)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::Format(format!(
                "Unsupported URL scheme '{}', expected http or https",
                other
            )));
        }
    }
    if parsed.host_str().is_none() {
        return Err(ValidationError::Format("URL has no host".to_string()));
    }
    Ok(())
}
