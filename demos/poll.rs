//! Polls a Crafty Controller on a fixed interval and prints every metric.
//!
//! Settings come from `CRAFTY_*` environment variables, or from the TOML file
//! given as the first argument. `RUST_LOG` controls log output.

use crafty_monitor::{CraftyMonitor, CraftyResult, Settings};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> CraftyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path).await?,
        None => Settings::from_env()?,
    };

    let mut monitor = CraftyMonitor::setup(&settings).await;
    if monitor.is_empty() {
        return Ok(());
    }

    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    loop {
        ticker.tick().await;
        let failures = monitor.refresh_all().await;
        for metric in monitor.metrics() {
            println!(
                "{:<40} {:<32} {}",
                metric.unique_id(),
                metric.name(),
                metric.state().unwrap_or("-")
            );
        }
        if failures > 0 {
            println!("{} server(s) failed to refresh", failures);
        }
    }
}
