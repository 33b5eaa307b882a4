use crate::registry::{encode_text, CollectorRegistry, TEXT_FORMAT};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::error;

/// State for the metrics endpoint.
#[derive(Clone)]
pub struct MetricsAppState {
    pub registry: Arc<CollectorRegistry>,
}

pub fn create_metrics_router(state: MetricsAppState, metrics_path: &str) -> Router {
    Router::new()
        .route(metrics_path, get(serve_metrics))
        .with_state(Arc::new(state))
}

/// GET <metrics_path> runs one scrape of every registered collector.
///
/// A failed upstream listing never fails the scrape; it only removes that
/// collector's samples.
async fn serve_metrics(State(state): State<Arc<MetricsAppState>>) -> Response {
    let families = state.registry.gather().await;
    match encode_text(&families) {
        Ok(body) => ([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode scrape");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
