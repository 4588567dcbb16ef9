//! Domain model for server list items from the `/api/v2/servers/` endpoint.

use crate::core::domain::value_object::serde_helpers::{
    lenient_string, unknown_string, unknown_value,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute mapping exposed alongside a metric value.
pub type Attributes = BTreeMap<String, Value>;

/// A game server managed by Crafty Controller.
///
/// Every field is optional upstream; absent fields hold the `"unknown"`
/// sentinel. Descriptors are created once at discovery and never change.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerDescriptor {
    /// Stable identifier used in every per-server endpoint.
    #[serde(default = "unknown_string", deserialize_with = "lenient_string::deserialize")]
    pub server_id: String,
    /// Display name (e.g., "Survival").
    #[serde(default = "unknown_string", deserialize_with = "lenient_string::deserialize")]
    pub server_name: String,
    #[serde(default = "unknown_value")]
    pub created: Value,
    #[serde(default = "unknown_value")]
    pub auto_start: Value,
    #[serde(default = "unknown_value")]
    pub crash_detection: Value,
    #[serde(default = "unknown_value")]
    pub server_ip: Value,
    #[serde(default = "unknown_value")]
    pub server_port: Value,
    /// Server flavour (e.g., "minecraft-java").
    #[serde(rename = "type", default = "unknown_value")]
    pub server_type: Value,
}

impl ServerDescriptor {
    /// Creates a descriptor with every static attribute set to `"unknown"`.
    pub fn new(server_id: impl Into<String>, server_name: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            server_name: server_name.into(),
            created: unknown_value(),
            auto_start: unknown_value(),
            crash_detection: unknown_value(),
            server_ip: unknown_value(),
            server_port: unknown_value(),
            server_type: unknown_value(),
        }
    }

    /// The static attributes seeded into the status metric.
    pub fn static_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("created".to_string(), self.created.clone());
        attributes.insert(
            "server_id".to_string(),
            Value::String(self.server_id.clone()),
        );
        attributes.insert(
            "server_name".to_string(),
            Value::String(self.server_name.clone()),
        );
        attributes.insert("auto_start".to_string(), self.auto_start.clone());
        attributes.insert("crash_detection".to_string(), self.crash_detection.clone());
        attributes.insert("server_ip".to_string(), self.server_ip.clone());
        attributes.insert("server_port".to_string(), self.server_port.clone());
        attributes.insert("type".to_string(), self.server_type.clone());
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes_default_to_unknown() {
        let descriptor: ServerDescriptor =
            serde_json::from_value(serde_json::json!({"server_id": 3, "server_name": "Lobby"}))
                .unwrap();
        assert_eq!(descriptor.server_id, "3");
        assert_eq!(descriptor.server_name, "Lobby");
        assert_eq!(descriptor.server_type, "unknown");
        assert_eq!(descriptor.server_port, "unknown");

        let attributes = descriptor.static_attributes();
        assert_eq!(attributes.len(), 8);
        assert_eq!(attributes["created"], "unknown");
        assert_eq!(attributes["server_id"], "3");
    }

    #[test]
    fn test_full_descriptor() {
        let descriptor: ServerDescriptor = serde_json::from_value(serde_json::json!({
            "server_id": "1f0c",
            "server_name": "Creative",
            "created": "2024-03-01 10:00:00",
            "auto_start": true,
            "crash_detection": false,
            "server_ip": "127.0.0.1",
            "server_port": 25565,
            "type": "minecraft-java"
        }))
        .unwrap();
        let attributes = descriptor.static_attributes();
        assert_eq!(attributes["auto_start"], true);
        assert_eq!(attributes["server_port"], 25565);
        assert_eq!(attributes["type"], "minecraft-java");
    }
}
