use crate::core::{
    domain::{
        error::{CraftyError, CraftyResult},
        model::{api_response::STATUS_OK, stats_payload::StatsPayload},
    },
    infrastructure::api_client::ApiClient,
};
use async_trait::async_trait;
use serde_json::Value;

/// Anything that can produce a stats snapshot for a server.
///
/// The seam between a `ServerMetricSet` and the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetches the current stats for `server_id`.
    ///
    /// # Errors
    /// * `CraftyError::Api` on transport or decode failure
    /// * `CraftyError::ApplicationStatus` if the envelope status is not `"ok"`
    async fn fetch_stats(&self, server_id: &str) -> CraftyResult<StatsPayload>;
}

/// Fetches per-server statistics over the Crafty v2 API.
#[derive(Debug, Clone)]
pub struct StatsFetcher {
    api_client: ApiClient,
}

impl StatsFetcher {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    fn stats_path(server_id: &str) -> String {
        format!("/api/v2/servers/{}/stats", server_id)
    }
}

#[async_trait]
impl StatsSource for StatsFetcher {
    async fn fetch_stats(&self, server_id: &str) -> CraftyResult<StatsPayload> {
        let envelope: Value = self.api_client.get(&Self::stats_path(server_id)).await?;

        let status = envelope.get("status").and_then(Value::as_str);
        if status != Some(STATUS_OK) {
            let status = status.unwrap_or("missing").to_string();
            tracing::error!(server_id, %envelope, "Error in server stats response");
            return Err(CraftyError::ApplicationStatus { status, envelope });
        }

        let data = envelope
            .get("data")
            .cloned()
            .ok_or_else(|| CraftyError::Api("Stats response has no data".to_string()))?;
        serde_json::from_value(data)
            .map_err(|e| CraftyError::Api(format!("Failed to parse stats data: {}", e)))
    }
}
