use crate::{
    core::domain::{
        error::{CraftyError, CraftyResult},
        model::{server_descriptor::{Attributes, ServerDescriptor}, stats_payload::StatsPayload},
    },
    metrics::domain::{
        metric::{Metric, MetricKind},
        normalizer::{
            CPU_FALLBACK, MEMORY_FALLBACK, normalize_cpu, normalize_memory, normalize_running,
        },
    },
    servers::application::service::stats_fetcher::StatsSource,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Something the host platform can list metrics from and refresh on a timer.
#[async_trait]
pub trait MonitoredEntity: Send {
    /// Every metric this entity exposes, in a stable order.
    fn metrics(&self) -> Vec<&Metric>;

    /// Pulls fresh data and updates the exposed metrics.
    ///
    /// # Errors
    /// Returns the failure that caused fallbacks to be applied; the metrics
    /// are already updated when this returns.
    async fn refresh(&mut self) -> CraftyResult<()>;
}

/// The status, memory and CPU metrics of one Crafty server.
///
/// The set owns its metric state exclusively; refreshing different sets
/// concurrently needs no synchronization.
pub struct ServerMetricSet {
    descriptor: ServerDescriptor,
    source: Arc<dyn StatsSource>,
    status: Metric,
    memory: Metric,
    cpu: Metric,
}

impl ServerMetricSet {
    /// Creates the metrics for `descriptor`. All states start unset.
    pub fn new(descriptor: ServerDescriptor, source: Arc<dyn StatsSource>, prefix: &str) -> Self {
        let id = descriptor.server_id.as_str();
        let name = descriptor.server_name.as_str();
        let status = Metric::new(
            MetricKind::Status,
            prefix,
            id,
            name,
            descriptor.static_attributes(),
        );
        let memory = Metric::new(MetricKind::Memory, prefix, id, name, id_attributes(id));
        let cpu = Metric::new(MetricKind::Cpu, prefix, id, name, id_attributes(id));

        Self {
            descriptor,
            source,
            status,
            memory,
            cpu,
        }
    }

    pub fn descriptor(&self) -> &ServerDescriptor {
        &self.descriptor
    }

    pub fn server_id(&self) -> &str {
        &self.descriptor.server_id
    }

    pub fn status(&self) -> &Metric {
        &self.status
    }

    pub fn memory(&self) -> &Metric {
        &self.memory
    }

    pub fn cpu(&self) -> &Metric {
        &self.cpu
    }

    /// Makes exactly one stats call and updates all three metrics from it.
    ///
    /// On failure memory becomes `"0"`, CPU becomes `"unknown"` and the
    /// status keeps its previous value.
    ///
    /// # Errors
    /// Returns the fetch error after the fallbacks were applied.
    pub async fn refresh(&mut self) -> CraftyResult<()> {
        let result = self.source.fetch_stats(&self.descriptor.server_id).await;
        match result {
            Ok(stats) => {
                self.apply(&stats);
                Ok(())
            }
            Err(error) => {
                // The fetcher already logged the envelope for status errors.
                if !matches!(error, CraftyError::ApplicationStatus { .. }) {
                    tracing::error!(
                        server_id = %self.descriptor.server_id,
                        %error,
                        "Error updating Crafty Controller server stats"
                    );
                }
                self.apply_fallback();
                Err(error)
            }
        }
    }

    fn apply(&mut self, stats: &StatsPayload) {
        let status = self.status.value_mut();
        status.set_state(Some(normalize_running(stats).to_string()));
        status.merge_attributes(stats.dynamic_attributes());

        self.cpu.value_mut().set_state(Some(normalize_cpu(stats)));
        self.memory
            .value_mut()
            .set_state(Some(normalize_memory(stats)));
    }

    fn apply_fallback(&mut self) {
        self.cpu
            .value_mut()
            .set_state(Some(CPU_FALLBACK.to_string()));
        self.memory
            .value_mut()
            .set_state(Some(MEMORY_FALLBACK.to_string()));
    }
}

#[async_trait]
impl MonitoredEntity for ServerMetricSet {
    fn metrics(&self) -> Vec<&Metric> {
        vec![&self.status, &self.memory, &self.cpu]
    }

    async fn refresh(&mut self) -> CraftyResult<()> {
        ServerMetricSet::refresh(self).await
    }
}

fn id_attributes(server_id: &str) -> Attributes {
    Attributes::from([(
        "server_id".to_string(),
        Value::String(server_id.to_string()),
    )])
}
