use crate::source::{EventSource, HttpEventSource};
use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::{
        StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW, CACHE_CONTROL,
        },
    },
    response::{IntoResponse, Response},
    routing::get,
};
use landing_config::LandingConfig;
use landing_events::{ExtractorConfig, extract};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Cache policy for successful responses; errors are never cached.
pub const CACHE_POLICY: &str = "public, max-age=3600";

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn EventSource>,
    pub extractor: Arc<ExtractorConfig>,
}

impl AppState {
    pub fn new(source: Arc<dyn EventSource>, extractor: ExtractorConfig) -> Self {
        Self {
            source,
            extractor: Arc::new(extractor),
        }
    }
}

/// `GET`/`OPTIONS` on `/` and `/events`; any other method, `HEAD` included,
/// is a 405.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(events).head(not_allowed).options(preflight))
        .route("/events", get(events).head(not_allowed).options(preflight))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn events(State(state): State<AppState>) -> Response {
    match state.source.fetch_html().await {
        Ok(html) => {
            let out = extract(&html, &state.extractor);
            tracing::info!(
                target: "edge",
                count = out.events.len(),
                source = ?out.source,
                "edge.events.ok"
            );
            (
                StatusCode::OK,
                [
                    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                    (CACHE_CONTROL, CACHE_POLICY),
                ],
                Json(json!({ "events": out.events })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(target: "edge", error = %e, "edge.events.fetch_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
                Json(json!({ "events": [], "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

async fn not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET, OPTIONS")])
}

/// Bind `server.bind` and serve the live events page until Ctrl-C.
pub async fn serve(config: &LandingConfig) -> anyhow::Result<()> {
    let source = HttpEventSource::from_site(&config.site)?;
    tracing::info!(target: "edge", upstream = source.url(), "edge.source");
    let state = AppState::new(
        Arc::new(source),
        ExtractorConfig::from_site(&config.site, config.extractor.limit),
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("binding {}", config.server.bind))?;
    tracing::info!(target: "edge", addr = %listener.local_addr()?, "edge.listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!(target: "edge", "edge.shutdown");
        })
        .await
        .context("edge server failed")
}
