mod crafty_api_token;
mod crafty_base_url;
pub mod serde_helpers;

pub use crafty_api_token::CraftyApiToken;
pub use crafty_base_url::{CraftyBaseUrl, DEFAULT_BASE_URL};
pub use serde_helpers::UNKNOWN;

// Re-export validation functions for internal use
pub(crate) use crafty_api_token::validate_api_token;
pub(crate) use crafty_base_url::validate_base_url;
