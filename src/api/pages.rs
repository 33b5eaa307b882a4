use crate::config::BuildInfo;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

const ROBOTS: &str = "User-agent: *\nDisallow: /\n";

/// State for the index and robots pages.
#[derive(Clone)]
pub struct PagesAppState {
    pub build_info: Arc<BuildInfo>,
    pub metrics_path: String,
}

pub fn create_pages_router(state: PagesAppState) -> Router {
    let index = render_index(&state.build_info, &state.metrics_path);
    Router::new()
        .route("/", get(root))
        .route("/robots.txt", get(robots))
        .with_state(Arc::new(index))
}

/// GET / serves the static index linking the exporter's endpoints.
async fn root(State(index): State<Arc<String>>) -> Html<String> {
    Html(index.as_str().to_owned())
}

/// GET /robots.txt
async fn robots() -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=UTF-8")],
        ROBOTS,
    )
        .into_response()
}

/// The page never changes after startup, so it is rendered once.
fn render_index(info: &BuildInfo, metrics_path: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en-US">
<head>
	<meta name="description" content="Prometheus Exporter for Koyeb">
	<meta name="viewport" content="width=device-width, initial-scale=1">
	<title>Prometheus Exporter for Koyeb</title>
	<style>
	body {{ font-family: Verdana; }}
	.footer {{ margin-top: 2rem; font-size: 0.8rem; color: #6a737d; border-top: 1px solid #eaecef; padding-top: 1rem; }}
	</style>
</head>
<body>
	<h2>Prometheus Exporter for Koyeb</h2>
	<hr/>
	<ul>
	<li><a href="{metrics}">metrics</a></li>
	<li><a href="/healthz">healthz</a></li>
	<li><a href="/varz">varz</a></li>
	</ul>
	<div class="footer">
		<p>Version: {version} | Commit: {commit} | OS: {os}</p>
		<p>Started: {started}</p>
	</div>
</body>
</html>
"#,
        metrics = escape(metrics_path),
        version = escape(&info.build_version),
        commit = escape(&info.git_commit),
        os = escape(&info.os_version),
        started = info.start_time_formatted(),
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
