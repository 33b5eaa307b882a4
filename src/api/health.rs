use crate::probe::Probe;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// State for the liveness endpoint.
#[derive(Clone)]
pub struct HealthAppState {
    pub probe: Probe,
}

pub fn create_health_router(state: HealthAppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// GET /healthz: 200 with the last status message while healthy, 503 otherwise.
async fn healthz(State(state): State<HealthAppState>) -> Response {
    let current = state.probe.state();
    let status = if current.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=UTF-8")],
        current.message,
    )
        .into_response()
}
