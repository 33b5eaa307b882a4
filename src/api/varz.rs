use crate::config::BuildInfo;
use crate::probe::{Probe, ProbeState};
use crate::registry::CollectorRegistry;
use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;

/// State for the debug variables endpoint.
#[derive(Clone)]
pub struct VarzAppState {
    pub registry: Arc<CollectorRegistry>,
    pub probe: Probe,
    pub build_info: Arc<BuildInfo>,
}

#[derive(Serialize)]
struct Varz<'a> {
    build: &'a BuildInfo,
    liveness: ProbeState,
    scrapes: u64,
    collectors: Vec<String>,
}

pub fn create_varz_router(state: VarzAppState) -> Router {
    Router::new()
        .route("/varz", get(varz))
        .with_state(Arc::new(state))
}

/// GET /varz returns process variables as JSON.
async fn varz(State(state): State<Arc<VarzAppState>>) -> Response {
    Json(Varz {
        build: &state.build_info,
        liveness: state.probe.state(),
        scrapes: state.registry.scrape_count(),
        collectors: state.registry.collector_names(),
    })
    .into_response()
}
