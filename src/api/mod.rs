// HTTP surface: metrics, liveness, debug variables and static pages

pub mod health;
pub mod metrics;
pub mod pages;
pub mod varz;

pub use health::{create_health_router, HealthAppState};
pub use metrics::{create_metrics_router, MetricsAppState};
pub use pages::{create_pages_router, PagesAppState};
pub use varz::{create_varz_router, VarzAppState};

use crate::config::BuildInfo;
use crate::probe::Probe;
use crate::registry::CollectorRegistry;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Everything the exporter's routes read from.
#[derive(Clone)]
pub struct ExporterAppState {
    pub registry: Arc<CollectorRegistry>,
    pub probe: Probe,
    pub build_info: Arc<BuildInfo>,
    pub metrics_path: String,
}

/// All exporter routes behind one request-tracing layer.
pub fn create_router(state: ExporterAppState) -> Router {
    Router::new()
        .merge(create_metrics_router(
            MetricsAppState {
                registry: Arc::clone(&state.registry),
            },
            &state.metrics_path,
        ))
        .merge(create_health_router(HealthAppState {
            probe: state.probe.clone(),
        }))
        .merge(create_varz_router(VarzAppState {
            registry: Arc::clone(&state.registry),
            probe: state.probe.clone(),
            build_info: Arc::clone(&state.build_info),
        }))
        .merge(create_pages_router(PagesAppState {
            build_info: state.build_info,
            metrics_path: state.metrics_path,
        }))
        .layer(TraceLayer::new_for_http())
}
