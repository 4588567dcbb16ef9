use crate::core::domain::value_object::{CraftyApiToken, CraftyBaseUrl};

/// Connection details shared read-only by every component.
#[derive(Debug, Clone)]
pub struct Credentials {
    base_url: CraftyBaseUrl,
    api_token: CraftyApiToken,
    verify_tls: bool,
}

impl Credentials {
    pub fn new(base_url: CraftyBaseUrl, api_token: CraftyApiToken, verify_tls: bool) -> Self {
        Self {
            base_url,
            api_token,
            verify_tls,
        }
    }

    pub fn base_url(&self) -> &CraftyBaseUrl {
        &self.base_url
    }

    pub fn api_token(&self) -> &CraftyApiToken {
        &self.api_token
    }

    /// Whether TLS certificates are verified (Crafty ships self-signed by default).
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }
}
