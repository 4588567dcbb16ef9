mod core;
mod metrics;
mod servers;

#[cfg(test)]
mod tests;

pub use crate::core::domain::error::{CraftyError, CraftyResult, ValidationError};
pub use crate::core::domain::model::{
    api_response::ApiResponse,
    credentials::Credentials,
    metric_value::MetricValue,
    server_descriptor::{Attributes, ServerDescriptor},
    settings::{DEFAULT_ENTITY_PREFIX, RateLimitConfig, Settings},
    stats_payload::StatsPayload,
};
pub use crate::core::domain::value_object::{
    CraftyApiToken, CraftyBaseUrl, DEFAULT_BASE_URL, UNKNOWN,
};
pub use crate::core::infrastructure::api_client::ApiClient;
pub use crate::metrics::application::service::server_metric_set::{
    MonitoredEntity, ServerMetricSet,
};
pub use crate::metrics::domain::metric::{Metric, MetricKind};
pub use crate::metrics::domain::normalizer;
pub use crate::servers::application::service::{
    server_directory::ServerDirectory,
    stats_fetcher::{StatsFetcher, StatsSource},
};

use futures::future::join_all;
use std::sync::Arc;

/// Status, memory and CPU metrics for every server of a Crafty Controller.
///
/// Discovery runs once, when the monitor is set up. Afterwards the host
/// platform drives [`CraftyMonitor::refresh_all`] (or each set's `refresh`)
/// from its own scheduler and reads [`CraftyMonitor::metrics`].
///
/// # Examples
///
/// ```no_run
/// use crafty_monitor::{CraftyMonitor, CraftyResult};
///
/// #[tokio::main]
/// async fn main() -> CraftyResult<()> {
///     let mut monitor = CraftyMonitor::builder()
///         .base_url("https://crafty.example.com:8443")
///         .api_token("token")
///         .verify_tls(false)
///         .build()
///         .await?;
///
///     monitor.refresh_all().await;
///     for metric in monitor.metrics() {
///         println!("{} = {:?}", metric.unique_id(), metric.state());
///     }
///     Ok(())
/// }
/// ```
pub struct CraftyMonitor {
    server_sets: Vec<ServerMetricSet>,
}

/// Builder for CraftyMonitor configuration
#[derive(Debug, Default)]
pub struct CraftyMonitorBuilder {
    settings: Settings,
}

impl CraftyMonitorBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.settings.crafty_base_url = base_url.into();
        self
    }

    pub fn api_token(mut self, api_token: impl Into<String>) -> Self {
        self.settings.api_token = Some(api_token.into());
        self
    }

    pub fn verify_tls(mut self, verify_tls: bool) -> Self {
        self.settings.verify_ssl = verify_tls;
        self
    }

    pub fn entity_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.entity_prefix = prefix.into();
        self
    }

    pub fn rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> Self {
        self.settings.rate_limit = Some(RateLimitConfig {
            requests_per_second,
            burst_size,
        });
        self
    }

    /// The settings collected so far.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Validates the configuration and runs discovery.
    ///
    /// # Errors
    /// Returns `CraftyError::Config` or `CraftyError::Validation` for bad
    /// configuration. Discovery failures are not errors; they yield an empty
    /// monitor.
    pub async fn build(self) -> CraftyResult<CraftyMonitor> {
        CraftyMonitor::try_setup(&self.settings).await
    }
}

impl CraftyMonitor {
    /// Creates a new builder for CraftyMonitor configuration
    pub fn builder() -> CraftyMonitorBuilder {
        CraftyMonitorBuilder::default()
    }

    /// Sets up monitoring the way the host platform expects: never fails.
    ///
    /// Invalid configuration is logged and yields a monitor without servers;
    /// no request is sent in that case.
    pub async fn setup(settings: &Settings) -> Self {
        match Self::try_setup(settings).await {
            Ok(monitor) => monitor,
            Err(error) => {
                tracing::error!(%error, "Crafty Controller integration not set up");
                Self::from_sets(Vec::new())
            }
        }
    }

    /// Validates `settings`, discovers the servers once and builds one
    /// [`ServerMetricSet`] per server.
    ///
    /// # Errors
    /// Returns `CraftyError::Config` if no API token is configured, and
    /// `CraftyError::Validation` for other invalid settings.
    pub async fn try_setup(settings: &Settings) -> CraftyResult<Self> {
        let credentials = settings.credentials()?;
        let api_client = ApiClient::new(credentials, settings.rate_limit)?;

        let servers = ServerDirectory::new(api_client.clone()).list_servers().await;
        if servers.is_empty() {
            tracing::error!("No servers found in Crafty Controller API");
        }

        let source: Arc<dyn StatsSource> = Arc::new(StatsFetcher::new(api_client));
        let server_sets: Vec<ServerMetricSet> = servers
            .into_iter()
            .map(|descriptor| {
                ServerMetricSet::new(descriptor, Arc::clone(&source), &settings.entity_prefix)
            })
            .collect();

        tracing::info!(
            servers = server_sets.len(),
            metrics = server_sets.len() * 3,
            "Crafty Controller monitoring set up"
        );
        Ok(Self::from_sets(server_sets))
    }

    /// Wraps already constructed metric sets.
    pub fn from_sets(server_sets: Vec<ServerMetricSet>) -> Self {
        Self { server_sets }
    }

    pub fn server_sets(&self) -> &[ServerMetricSet] {
        &self.server_sets
    }

    pub fn server_sets_mut(&mut self) -> &mut [ServerMetricSet] {
        &mut self.server_sets
    }

    /// Every exposed metric: status, memory and CPU per server, in discovery order.
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.server_sets.iter().flat_map(|set| set.metrics())
    }

    /// Looks up a metric by its unique id.
    pub fn metric(&self, unique_id: &str) -> Option<&Metric> {
        self.metrics().find(|metric| metric.unique_id() == unique_id)
    }

    pub fn is_empty(&self) -> bool {
        self.server_sets.is_empty()
    }

    /// Refreshes every server concurrently.
    ///
    /// Failures stay with their server (fallbacks are applied there and the
    /// error is logged); returns how many refreshes failed.
    pub async fn refresh_all(&mut self) -> usize {
        join_all(self.server_sets.iter_mut().map(|set| set.refresh()))
            .await
            .into_iter()
            .filter(Result::is_err)
            .count()
    }
}
