//! Serde helpers for the loosely typed Crafty payloads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Sentinel used for every attribute the upstream did not send.
pub const UNKNOWN: &str = "unknown";

/// Default for optional attributes: the `"unknown"` sentinel.
pub fn unknown_value() -> Value {
    Value::String(UNKNOWN.to_string())
}

/// Default for optional string fields: the `"unknown"` sentinel.
pub fn unknown_string() -> String {
    UNKNOWN.to_string()
}

/// Deserializes a string from any JSON scalar.
///
/// Crafty has shipped both integer and UUID server ids, so numbers and
/// booleans are rendered to text; `null` becomes the `"unknown"` sentinel.
pub mod lenient_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Null => unknown_string(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default = "unknown_string", deserialize_with = "lenient_string::deserialize")]
        id: String,
    }

    #[test]
    fn test_lenient_string_accepts_scalars() {
        let cases = [
            (serde_json::json!({"id": "a1b2"}), "a1b2"),
            (serde_json::json!({"id": 7}), "7"),
            (serde_json::json!({"id": null}), "unknown"),
            (serde_json::json!({}), "unknown"),
        ];
        for (input, expected) in cases {
            let holder: Holder = serde_json::from_value(input).unwrap();
            assert_eq!(holder.id, expected);
        }
    }
}
