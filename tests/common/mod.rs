// Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use koyeb_api::{KoyebClient, PlatformApi};
use koyeb_exporter::api::{create_router, ExporterAppState};
use koyeb_exporter::collector::{
    AppsCollector, Collector, CredentialsCollector, DeploymentsCollector, DomainsCollector,
    ExporterCollector, InstancesCollector, SecretsCollector, ServicesCollector,
};
use koyeb_exporter::config::BuildInfo;
use koyeb_exporter::probe::{self, Probe};
use koyeb_exporter::registry::CollectorRegistry;
use koyeb_exporter::shutdown::{self, ShutdownSender};
use mockito::{Mock, ServerGuard};
use std::sync::Arc;
use tower::ServiceExt;

pub const RESOURCES: &[&str] = &[
    "apps",
    "credentials",
    "deployments",
    "domains",
    "instances",
    "secrets",
    "services",
];

pub struct TestExporter {
    pub app: Router,
    pub probe: Probe,
    pub shutdown_tx: ShutdownSender,
}

impl Drop for TestExporter {
    fn drop(&mut self) {
        self.shutdown_tx.send_replace(true);
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        os_version: "6.1.0".to_string(),
        build_version: "0.1.0".to_string(),
        git_commit: "abc123".to_string(),
        start_time: 1_700_000_000,
    }
}

/// Full exporter against `base_url`, with the liveness updater running.
pub fn exporter(base_url: String, metrics_path: &str) -> TestExporter {
    let (shutdown_tx, shutdown) = shutdown::channel();
    let probe = Probe::new("liveness");
    let (tx, rx) = probe::channel(probe::DEFAULT_CHANNEL_CAPACITY);
    tokio::spawn(probe.clone().run_updater(rx, shutdown.clone()));

    let client: Arc<dyn PlatformApi> =
        Arc::new(KoyebClient::with_base_url("test_token".to_string(), base_url).unwrap());
    let build_info = Arc::new(build_info());

    let collectors: Vec<Arc<dyn Collector>> = vec![
        Arc::new(ExporterCollector::new(&build_info)),
        Arc::new(AppsCollector::new(client.clone(), tx.clone(), shutdown.clone())),
        Arc::new(CredentialsCollector::new(client.clone(), tx.clone(), shutdown.clone())),
        Arc::new(DeploymentsCollector::new(client.clone(), tx.clone(), shutdown.clone())),
        Arc::new(DomainsCollector::new(client.clone(), tx.clone(), shutdown.clone())),
        Arc::new(InstancesCollector::new(client.clone(), tx.clone(), shutdown.clone())),
        Arc::new(SecretsCollector::new(client.clone(), tx.clone(), shutdown.clone())),
        Arc::new(ServicesCollector::new(client, tx, shutdown)),
    ];
    let mut registry = CollectorRegistry::new();
    for collector in collectors {
        registry.register(collector).unwrap();
    }

    let app = create_router(ExporterAppState {
        registry: Arc::new(registry),
        probe: probe.clone(),
        build_info,
        metrics_path: metrics_path.to_string(),
    });

    TestExporter {
        app,
        probe,
        shutdown_tx,
    }
}

/// Mock one list endpoint answering 200 with `body`.
pub async fn mock_list(server: &mut ServerGuard, resource: &str, body: &str) -> Mock {
    server
        .mock("GET", format!("/v1/{}?limit=100&offset=0", resource).as_str())
        .match_header("authorization", "Bearer test_token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Mock one list endpoint failing with `status`.
pub async fn mock_failure(server: &mut ServerGuard, resource: &str, status: usize) -> Mock {
    server
        .mock("GET", format!("/v1/{}?limit=100&offset=0", resource).as_str())
        .with_status(status)
        .with_body(r#"{"error": "nope"}"#)
        .create_async()
        .await
}

/// Mock every list endpoint not in `skip` as an empty listing.
pub async fn mock_empty_except(server: &mut ServerGuard, skip: &[&str]) -> Vec<Mock> {
    let mut mocks = Vec::new();
    for resource in RESOURCES.iter().filter(|r| !skip.contains(*r)) {
        let body = format!(r#"{{"{}": [], "has_next": false}}"#, resource);
        mocks.push(mock_list(server, resource, &body).await);
    }
    mocks
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Give the liveness updater a moment to fold pending signals.
pub async fn settle() {
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
}
