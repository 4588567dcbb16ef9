use crate::{CraftyError, CraftyMonitor, MonitoredEntity, Settings};
use tracing_test::traced_test;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn create_test_settings(server_url: &str) -> Settings {
    Settings {
        crafty_base_url: format!("{}/", server_url),
        api_token: Some("test-token".to_string()),
        verify_ssl: true,
        ..Default::default()
    }
}

async fn mount_servers(mock_server: &MockServer, servers: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v2/servers/"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "ok", "data": servers})),
        )
        .mount(mock_server)
        .await;
}

fn stats_ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok", "data": data}))
}

#[tokio::test]
async fn test_end_to_end_refresh() {
    let mock_server = MockServer::start().await;
    mount_servers(
        &mock_server,
        serde_json::json!([{"server_id": "7", "server_name": "Survival"}]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/servers/7/stats"))
        .respond_with(stats_ok(serde_json::json!({
            "running": true,
            "cpu": "12%",
            "mem": "1.25GB"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut monitor = CraftyMonitor::try_setup(&create_test_settings(&mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(monitor.metrics().count(), 3);

    assert_eq!(monitor.refresh_all().await, 0);

    let status = monitor.metric("crafty_7_status").unwrap();
    assert_eq!(status.name(), "Crafty Survival Status");
    assert_eq!(status.state(), Some("running"));
    assert_eq!(status.attributes()["server_name"], "Survival");
    assert_eq!(status.attributes()["desc"], "unknown");
    assert_eq!(
        monitor.metric("crafty_7_cpu").unwrap().state(),
        Some("12%")
    );
    assert_eq!(
        monitor.metric("crafty_7_memory").unwrap().state(),
        Some("1.25")
    );
}

#[tokio::test]
async fn test_end_to_end_transport_failure() {
    let mock_server = MockServer::start().await;
    mount_servers(
        &mock_server,
        serde_json::json!([{"server_id": "7", "server_name": "Survival"}]),
    )
    .await;

    // First refresh succeeds, every later one fails.
    Mock::given(method("GET"))
        .and(path("/api/v2/servers/7/stats"))
        .respond_with(stats_ok(serde_json::json!({
            "running": true,
            "cpu": "12%",
            "mem": "1.25GB"
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/servers/7/stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut monitor = CraftyMonitor::try_setup(&create_test_settings(&mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(monitor.refresh_all().await, 0);

    let set = &mut monitor.server_sets_mut()[0];
    assert!(matches!(set.refresh().await, Err(CraftyError::Api(_))));
    assert_eq!(set.status().state(), Some("running"));
    assert_eq!(set.cpu().state(), Some("unknown"));
    assert_eq!(set.memory().state(), Some("0"));
}

#[tokio::test]
async fn test_failures_are_isolated_per_server() {
    let mock_server = MockServer::start().await;
    mount_servers(
        &mock_server,
        serde_json::json!([
            {"server_id": "1", "server_name": "Healthy"},
            {"server_id": "2", "server_name": "Broken"}
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/servers/1/stats"))
        .respond_with(stats_ok(serde_json::json!({
            "running": false,
            "cpu": 0,
            "mem": 0
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/servers/2/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "error",
            "error": "SERVER_NOT_FOUND"
        })))
        .mount(&mock_server)
        .await;

    let mut monitor = CraftyMonitor::try_setup(&create_test_settings(&mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(monitor.refresh_all().await, 1);

    let healthy = &monitor.server_sets()[0];
    assert_eq!(healthy.status().state(), Some("stopped"));
    assert_eq!(healthy.cpu().state(), Some("0"));
    assert_eq!(healthy.memory().state(), Some("0"));

    let broken = &monitor.server_sets()[1];
    assert_eq!(broken.server_id(), "2");
    assert_eq!(broken.status().state(), None);
    assert_eq!(broken.cpu().state(), Some("unknown"));
    assert_eq!(broken.memory().state(), Some("0"));
}

#[tokio::test]
async fn test_refresh_is_idempotent() {
    let mock_server = MockServer::start().await;
    mount_servers(
        &mock_server,
        serde_json::json!([{"server_id": 3, "server_name": "Modded"}]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/servers/3/stats"))
        .respond_with(stats_ok(serde_json::json!({
            "running": true,
            "cpu": 41.5,
            "mem": "3072MB",
            "online": 5
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut monitor = CraftyMonitor::try_setup(&create_test_settings(&mock_server.uri()))
        .await
        .unwrap();

    monitor.refresh_all().await;
    let first: Vec<_> = monitor.metrics().cloned().collect();
    monitor.refresh_all().await;
    let second: Vec<_> = monitor.metrics().cloned().collect();

    assert_eq!(first, second);
    assert_eq!(monitor.metric("crafty_3_memory").unwrap().state(), Some("3"));
    assert_eq!(monitor.metric("crafty_3_cpu").unwrap().state(), Some("41.5"));
}

#[tokio::test]
#[traced_test]
async fn test_missing_token_sends_no_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let settings = Settings {
        api_token: None,
        ..create_test_settings(&mock_server.uri())
    };

    let monitor = CraftyMonitor::setup(&settings).await;
    assert!(monitor.is_empty());
    assert_eq!(monitor.metrics().count(), 0);
    assert!(logs_contain("No API token found"));

    assert!(matches!(
        CraftyMonitor::try_setup(&settings).await,
        Err(CraftyError::Config(_))
    ));
}

#[tokio::test]
#[traced_test]
async fn test_discovery_failure_yields_empty_monitor() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/servers/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&mock_server)
        .await;

    let mut monitor = CraftyMonitor::try_setup(&create_test_settings(&mock_server.uri()))
        .await
        .unwrap();
    assert!(monitor.is_empty());
    assert_eq!(monitor.refresh_all().await, 0);
    assert!(logs_contain("No servers found in Crafty Controller API"));
}

#[tokio::test]
async fn test_builder_with_custom_prefix() {
    let mock_server = MockServer::start().await;
    mount_servers(
        &mock_server,
        serde_json::json!([{"server_id": "a1", "server_name": "Lobby"}]),
    )
    .await;

    let monitor = CraftyMonitor::builder()
        .base_url(mock_server.uri())
        .api_token("test-token")
        .entity_prefix("mc")
        .rate_limit(10, 10)
        .build()
        .await
        .unwrap();

    let ids: Vec<&str> = monitor.server_sets()[0]
        .metrics()
        .into_iter()
        .map(|metric| metric.unique_id())
        .collect();
    assert_eq!(ids, vec!["mc_a1_status", "mc_a1_memory", "mc_a1_cpu"]);
    assert_eq!(monitor.server_sets()[0].cpu().name(), "Mc Lobby CPU");
}
