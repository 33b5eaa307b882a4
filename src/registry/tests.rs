use super::*;
use crate::collector::testing::{drain_statuses, liveness, no_shutdown, StubApi};
use crate::collector::{
    AppsCollector, CredentialsCollector, DeploymentsCollector, DomainsCollector,
    ExporterCollector, InstancesCollector, SecretsCollector, ServicesCollector,
};
use crate::config::BuildInfo;
use crate::probe::{self, Probe, Status, StatusSender};
use crate::shutdown;
use koyeb_api::{App, Deployment, PlatformApi, Secret, Service};
use std::time::Duration;

fn build_info() -> BuildInfo {
    BuildInfo {
        os_version: "6.1.0".to_string(),
        build_version: "0.1.0".to_string(),
        git_commit: "abc123".to_string(),
        start_time: 1_700_000_000,
    }
}

/// All eight collectors over one API handle.
fn full_registry(api: Arc<dyn PlatformApi>, tx: StatusSender) -> CollectorRegistry {
    let shutdown = no_shutdown();
    let collectors: Vec<Arc<dyn Collector>> = vec![
        Arc::new(ExporterCollector::new(&build_info())),
        Arc::new(AppsCollector::new(api.clone(), tx.clone(), shutdown.clone())),
        Arc::new(CredentialsCollector::new(api.clone(), tx.clone(), shutdown.clone())),
        Arc::new(DeploymentsCollector::new(api.clone(), tx.clone(), shutdown.clone())),
        Arc::new(DomainsCollector::new(api.clone(), tx.clone(), shutdown.clone())),
        Arc::new(InstancesCollector::new(api.clone(), tx.clone(), shutdown.clone())),
        Arc::new(SecretsCollector::new(api.clone(), tx.clone(), shutdown.clone())),
        Arc::new(ServicesCollector::new(api, tx, shutdown)),
    ];

    let mut registry = CollectorRegistry::new();
    for collector in collectors {
        registry.register(collector).unwrap();
    }
    registry
}

fn populated_api() -> StubApi {
    StubApi {
        apps: vec![
            App {
                id: "a1".to_string(),
                name: "web".to_string(),
                organization_id: "org1".to_string(),
                status: "RUNNING".to_string(),
            },
            App {
                id: "a2".to_string(),
                name: "worker".to_string(),
                organization_id: "org1".to_string(),
                status: "STOPPED".to_string(),
            },
        ],
        deployments: vec![Deployment {
            id: "d1".to_string(),
            ..Deployment::default()
        }],
        secrets: vec![Secret {
            id: "s1".to_string(),
            ..Secret::default()
        }],
        services: vec![Service {
            id: "svc1".to_string(),
            ..Service::default()
        }],
        ..StubApi::default()
    }
}

fn family<'a>(families: &'a [MetricFamily], name: &str) -> Option<&'a MetricFamily> {
    families.iter().find(|f| f.get_name() == name)
}

#[test]
fn test_register_rejects_duplicate_descriptor() {
    let (tx, _rx) = liveness();
    let api: Arc<dyn PlatformApi> = Arc::new(StubApi::default());
    let shutdown = no_shutdown();
    let mut registry = CollectorRegistry::new();

    registry
        .register(Arc::new(AppsCollector::new(api.clone(), tx.clone(), shutdown.clone())))
        .unwrap();
    let err = registry
        .register(Arc::new(AppsCollector::new(api.clone(), tx.clone(), shutdown.clone())))
        .unwrap_err();
    assert!(err.to_string().contains("koyeb_apps_up already registered"));

    // A failed registration does not stop later ones
    registry
        .register(Arc::new(SecretsCollector::new(api, tx, shutdown)))
        .unwrap();
    assert_eq!(registry.collector_names(), vec!["apps", "secrets"]);
}

#[test]
fn test_describe_is_idempotent() {
    let (tx, _rx) = liveness();
    let collector =
        InstancesCollector::new(Arc::new(StubApi::default()), tx, no_shutdown());

    let first: Vec<String> = collector.describe().iter().map(|d| d.fq_name()).collect();
    let second: Vec<String> = collector.describe().iter().map(|d| d.fq_name()).collect();

    assert_eq!(first, vec!["koyeb_instances_up"]);
    assert_eq!(first, second);
    assert_eq!(
        collector.describe()[0].label_names(),
        &["id", "app_id", "service_id", "organization_id", "region", "status"]
    );
}

#[tokio::test]
async fn test_describe_does_not_touch_api_or_liveness() {
    let api = Arc::new(StubApi::default());
    let (tx, mut rx) = liveness();
    let collector = DomainsCollector::new(api.clone(), tx, no_shutdown());

    for _ in 0..3 {
        collector.describe();
    }

    assert_eq!(api.calls(), 0);
    assert!(drain_statuses(&mut rx).is_empty());
}

#[tokio::test]
async fn test_gather_sample_counts_match_records() {
    let (tx, mut rx) = liveness();
    let registry = full_registry(Arc::new(populated_api()), tx);

    let families = registry.gather().await;

    let count = |name: &str| family(&families, name).map_or(0, |f| f.get_metric().len());
    assert_eq!(count("koyeb_apps_up"), 2);
    assert_eq!(count("koyeb_deployments_up"), 1);
    assert_eq!(count("koyeb_secrets_up"), 1);
    assert_eq!(count("koyeb_services_up"), 1);
    assert_eq!(count("koyeb_exporter_build_info"), 1);
    // Empty listings produce no family at all
    assert!(family(&families, "koyeb_credentials_up").is_none());
    assert!(family(&families, "koyeb_domains_up").is_none());

    // Seven resource collectors, one signal each
    let statuses = drain_statuses(&mut rx);
    assert_eq!(statuses.len(), 7);
    assert!(statuses.iter().all(|s| s.healthy));
    assert_eq!(registry.scrape_count(), 1);
}

#[tokio::test]
async fn test_gather_label_arity() {
    let (tx, _rx) = liveness();
    let registry = full_registry(Arc::new(populated_api()), tx);

    let families = registry.gather().await;

    let apps = family(&families, "koyeb_apps_up").unwrap();
    for metric in apps.get_metric() {
        let mut names: Vec<&str> = metric.get_label().iter().map(|l| l.get_name()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["id", "name", "organization", "status"]);
        assert_eq!(metric.get_gauge().get_value(), 1.0);
    }
    let deployments = family(&families, "koyeb_deployments_up").unwrap();
    assert_eq!(deployments.get_metric()[0].get_label().len(), 7);
}

#[tokio::test]
async fn test_failing_collector_does_not_affect_others() {
    let mut api = populated_api();
    api.failing.insert("deployments");
    let (tx, mut rx) = liveness();
    let registry = full_registry(Arc::new(api), tx);

    let families = registry.gather().await;

    assert!(family(&families, "koyeb_deployments_up").is_none());
    assert_eq!(
        family(&families, "koyeb_apps_up").unwrap().get_metric().len(),
        2
    );

    let statuses = drain_statuses(&mut rx);
    assert_eq!(statuses.len(), 7);
    let failures: Vec<&Status> = statuses.iter().filter(|s| !s.healthy).collect();
    assert_eq!(failures, vec![&Status::unhealthy("unable to list Deployments")]);
}

#[tokio::test]
async fn test_every_collector_signals_once_when_all_fail() {
    let api = StubApi::failing(&[
        "apps",
        "credentials",
        "deployments",
        "domains",
        "instances",
        "secrets",
        "services",
    ]);
    let (tx, mut rx) = liveness();
    let registry = full_registry(Arc::new(api), tx);

    let families = registry.gather().await;

    // Only the exporter's own metric survives
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].get_name(), "koyeb_exporter_build_info");

    let mut messages: Vec<String> = drain_statuses(&mut rx)
        .into_iter()
        .map(|s| s.message)
        .collect();
    messages.sort();
    assert_eq!(
        messages,
        vec![
            "unable to list Apps",
            "unable to list Credentials",
            "unable to list Deployments",
            "unable to list Domains",
            "unable to list Instances",
            "unable to list Secrets",
            "unable to list Services",
        ]
    );
}

#[tokio::test]
async fn test_scrape_during_shutdown_still_signals_failure() {
    let api: Arc<dyn PlatformApi> = Arc::new(StubApi {
        delay: Some(Duration::from_secs(30)),
        ..populated_api()
    });
    let (tx, mut rx) = liveness();
    let (stop, shutdown) = shutdown::channel();
    let mut registry = CollectorRegistry::new();
    registry
        .register(Arc::new(AppsCollector::new(api, tx, shutdown)))
        .unwrap();

    stop.send_replace(true);
    let families = tokio::time::timeout(Duration::from_secs(1), registry.gather())
        .await
        .expect("scrape did not return promptly on shutdown");

    assert!(families.is_empty());
    assert_eq!(
        drain_statuses(&mut rx),
        vec![Status::unhealthy("unable to list Apps")]
    );
}

#[tokio::test]
async fn test_concurrent_collectors_wait_for_idle_consumer() {
    let (tx, rx) = probe::channel(1);
    let api: Arc<dyn PlatformApi> = Arc::new(populated_api());
    let (stop, shutdown) = shutdown::channel();
    let mut registry = CollectorRegistry::new();
    registry
        .register(Arc::new(AppsCollector::new(api.clone(), tx.clone(), shutdown.clone())))
        .unwrap();
    registry
        .register(Arc::new(ServicesCollector::new(api, tx, shutdown.clone())))
        .unwrap();
    let registry = Arc::new(registry);

    // Buffer of one, nobody receiving: the second signal cannot be delivered
    let scrape = tokio::spawn({
        let registry = Arc::clone(&registry);
        async move { registry.gather().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!scrape.is_finished(), "scrape finished without a consumer");

    let probe = Probe::new("liveness");
    tokio::spawn(probe.clone().run_updater(rx, shutdown));

    let families = tokio::time::timeout(Duration::from_secs(1), scrape)
        .await
        .expect("scrape stayed blocked after consumer resumed")
        .unwrap();

    // No sample lost while blocked
    assert_eq!(
        family(&families, "koyeb_apps_up").unwrap().get_metric().len(),
        2
    );
    assert_eq!(
        family(&families, "koyeb_services_up").unwrap().get_metric().len(),
        1
    );

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(probe.state().updates, 2);
    stop.send_replace(true);
}

#[tokio::test]
async fn test_encode_text() {
    let (tx, _rx) = liveness();
    let registry = full_registry(Arc::new(populated_api()), tx);

    let text = encode_text(&registry.gather().await).unwrap();

    assert!(text.contains("# HELP koyeb_apps_up 1 if the App is up, 0 otherwise"));
    assert!(text.contains("# TYPE koyeb_apps_up gauge"));
    assert!(text.contains(
        r#"koyeb_apps_up{id="a1",name="web",organization="org1",status="RUNNING"} 1"#
    ));
    assert!(text.contains(r#"git_commit="abc123""#));
    assert!(!text.contains("koyeb_domains_up"));
}
