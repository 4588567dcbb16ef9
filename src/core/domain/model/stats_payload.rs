//! Domain model for the `data` object of `/api/v2/servers/{id}/stats`.

use crate::core::domain::{model::server_descriptor::Attributes, value_object::UNKNOWN};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One statistics snapshot for a server.
///
/// Crafty's field types drift between releases, so everything is kept as
/// raw JSON and interpreted by the metric normalizers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StatsPayload {
    #[serde(default)]
    pub running: Option<Value>,
    /// CPU usage as reported (number or string such as "12%").
    #[serde(default)]
    pub cpu: Option<Value>,
    /// Memory usage, either `0` or a unit-suffixed string ("2.5GB", "512MB").
    #[serde(default)]
    pub mem: Option<Value>,
    #[serde(default)]
    pub mem_percent: Option<Value>,
    #[serde(default)]
    pub world_size: Option<Value>,
    /// Maximum player count.
    #[serde(default)]
    pub max: Option<Value>,
    /// Online player count.
    #[serde(default)]
    pub online: Option<Value>,
    #[serde(default)]
    pub desc: Option<Value>,
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub updating: Option<Value>,
    #[serde(default)]
    pub waiting_start: Option<Value>,
    #[serde(default)]
    pub first_run: Option<Value>,
    #[serde(default)]
    pub crashed: Option<Value>,
    #[serde(default)]
    pub downloading: Option<Value>,
    #[serde(default)]
    pub started: Option<Value>,
    #[serde(default)]
    pub int_ping_results: Option<Value>,
}

impl StatsPayload {
    /// Dynamic attributes merged into the status metric after a refresh.
    ///
    /// `max` and `online` are exposed as `max_players` and `online_players`.
    pub fn dynamic_attributes(&self) -> Attributes {
        let fields = [
            ("started", &self.started),
            ("cpu", &self.cpu),
            ("mem", &self.mem),
            ("mem_percent", &self.mem_percent),
            ("world_size", &self.world_size),
            ("int_ping_results", &self.int_ping_results),
            ("max_players", &self.max),
            ("online_players", &self.online),
            ("desc", &self.desc),
            ("version", &self.version),
            ("updating", &self.updating),
            ("waiting_start", &self.waiting_start),
            ("first_run", &self.first_run),
            ("crashed", &self.crashed),
            ("downloading", &self.downloading),
        ];
        fields
            .into_iter()
            .map(|(name, value)| {
                let value = value
                    .clone()
                    .unwrap_or_else(|| Value::String(UNKNOWN.to_string()));
                (name.to_string(), value)
            })
            .collect()
    }
}
