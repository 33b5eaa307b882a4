use anyhow::{Context, Result};
use clap::Parser;
use koyeb_api::{KoyebClient, PlatformApi};
use koyeb_exporter::api::{create_router, ExporterAppState};
use koyeb_exporter::collector::{
    AppsCollector, Collector, CredentialsCollector, DeploymentsCollector, DomainsCollector,
    ExporterCollector, InstancesCollector, SecretsCollector, ServicesCollector,
};
use koyeb_exporter::config::{self, BuildInfo, ExporterConfig};
use koyeb_exporter::probe::{self, Probe};
use koyeb_exporter::registry::CollectorRegistry;
use koyeb_exporter::shutdown;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "koyeb-exporter", about = "Prometheus Exporter for Koyeb", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// The endpoint of the exporter's HTTP server
    #[arg(long)]
    endpoint: Option<String>,

    /// The path on which Prometheus metrics will be served
    #[arg(long)]
    path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "koyeb_exporter=info,koyeb_api=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ExporterConfig::default(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.server.endpoint = endpoint;
    }
    if let Some(path) = cli.path {
        config.server.metrics_path = path;
    }
    config.validate().context("Invalid configuration")?;

    let build_info = Arc::new(BuildInfo::from_env());
    for name in build_info.missing() {
        error!(value = name, "value unchanged: expected value to be set during build");
    }

    let token = match std::env::var("TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => {
            error!("unable to get TOKEN from environment");
            anyhow::bail!("TOKEN is required");
        }
    };

    let (shutdown_tx, shutdown) = shutdown::channel();

    // The liveness consumer must be receiving before any collector exists
    let probe = Probe::new("liveness");
    let (status_tx, status_rx) = probe::channel(config.liveness.channel_capacity);
    let updater = tokio::spawn(probe.clone().run_updater(status_rx, shutdown.clone()));

    let client: Arc<dyn PlatformApi> = Arc::new(
        KoyebClient::with_options(token, config.api.client_options())
            .context("Failed to create Koyeb client")?,
    );

    let collectors: Vec<Arc<dyn Collector>> = vec![
        Arc::new(ExporterCollector::new(&build_info)),
        Arc::new(AppsCollector::new(client.clone(), status_tx.clone(), shutdown.clone())),
        Arc::new(CredentialsCollector::new(client.clone(), status_tx.clone(), shutdown.clone())),
        Arc::new(DeploymentsCollector::new(client.clone(), status_tx.clone(), shutdown.clone())),
        Arc::new(DomainsCollector::new(client.clone(), status_tx.clone(), shutdown.clone())),
        Arc::new(InstancesCollector::new(client.clone(), status_tx.clone(), shutdown.clone())),
        Arc::new(SecretsCollector::new(client.clone(), status_tx.clone(), shutdown.clone())),
        Arc::new(ServicesCollector::new(client, status_tx, shutdown.clone())),
    ];

    let mut registry = CollectorRegistry::new();
    for collector in collectors {
        let name = collector.name().to_string();
        if let Err(e) = registry.register(collector) {
            error!(collector = %name, error = %e, "failed to register collector");
        }
    }

    let router = create_router(ExporterAppState {
        registry: Arc::new(registry),
        probe,
        build_info,
        metrics_path: config.server.metrics_path.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&config.server.endpoint)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.endpoint))?;
    info!(
        endpoint = %config.server.endpoint,
        metrics = %config.server.metrics_path,
        "Server starting"
    );

    tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!(error = %e, "Failed to listen for ctrl_c signal"),
            }
            shutdown_tx.send_replace(true);
        }
    });

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.requested().await })
        .await
        .context("HTTP server error")?;

    shutdown_tx.send_replace(true);
    if let Err(e) = updater.await {
        error!(error = %e, "Liveness updater panicked");
    }
    info!("Exporter stopped");

    Ok(())
}
