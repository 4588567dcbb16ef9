use crate::core::domain::error::ValidationError;

/// A Crafty Controller API bearer token.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct CraftyApiToken {
    value: String,
}

impl CraftyApiToken {
    /// # Errors
    /// Returns `ValidationError` if the token is empty or whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_api_token(&value)?;
        Ok(Self { value })
    }

    /// Creates a token without validation.
    #[allow(dead_code)] // used by tests to build clients directly
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Formats the token as an `Authorization` header value.
    #[must_use]
    pub fn as_bearer_header(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl std::fmt::Debug for CraftyApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CraftyApiToken(***)")
    }
}

pub(crate) fn validate_api_token(token: &str) -> Result<(), ValidationError> {
    if token.trim().is_empty() {
        return Err(ValidationError::Field {
            field: "api_token".to_string(),
            message: "API token cannot be empty".to_string(),
        });
    }
    Ok(())
}
