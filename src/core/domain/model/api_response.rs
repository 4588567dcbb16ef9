//! The `{status, data}` envelope every Crafty v2 endpoint wraps its payload in.

use serde::{Deserialize, Serialize};

/// Status value Crafty uses for successful calls.
pub const STATUS_OK: &str = "ok";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}
