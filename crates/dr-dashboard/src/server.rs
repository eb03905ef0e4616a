//! HTTP server for the DR dashboard.
//!
//! Provides:
//! - `/` single-page UI shell and `/static/*` assets
//! - `/api/scenarios` catalog snapshot
//! - `/api/recovery-process?file=<name>` runbook markdown
//! - `/health` liveness probe

use anyhow::Result;
use axum::{
    extract::{OriginalUri, Query, State},
    handler::HandlerWithoutStateExt,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::models::{DisasterScenario, DiscardedScenario};
use crate::store::ScenarioStore;

const MARKDOWN: &str = "text/markdown; charset=utf-8";
const HTML: &str = "text/html; charset=utf-8";

/// Shared application state. Read-only after construction.
#[derive(Clone)]
pub struct AppState {
    /// Scenario catalog.
    pub store: Arc<ScenarioStore>,
    /// Resolved configuration.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: ScenarioStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// Build the HTTP router.
pub fn build_router(state: AppState) -> Router {
    let assets =
        ServeDir::new(&state.config.static_dir).not_found_service(not_found.into_service());

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/scenarios", get(scenarios_handler))
        .route("/api/recovery-process", get(recovery_process_handler))
        .nest_service("/static", assets)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and run until SIGINT/SIGTERM.
pub async fn run_server(state: AppState) -> Result<()> {
    let addr = state.config.listen_addr;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "DR dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("DR dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

/// Catalog snapshot returned by `/api/scenarios`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenariosResponse<'a> {
    environment: &'static str,
    scenarios: &'a [DisasterScenario],
    discarded_scenarios: &'a [DiscardedScenario],
}

/// Why a requested runbook name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileNameRejection {
    Missing,
    Traversal,
}

impl FileNameRejection {
    fn message(self) -> &'static str {
        match self {
            FileNameRejection::Missing => "Missing file parameter",
            FileNameRejection::Traversal => "Invalid file name",
        }
    }
}

/// First `file` value of the query string; later duplicates are ignored.
fn first_file_param(params: Vec<(String, String)>) -> Option<String> {
    params
        .into_iter()
        .find(|(key, _)| key == "file")
        .map(|(_, value)| value)
}

/// Accept only bare filenames that stay inside the runbook directory.
pub fn validate_file_name(file: Option<&str>) -> Result<&str, FileNameRejection> {
    let file = file
        .filter(|f| !f.is_empty())
        .ok_or(FileNameRejection::Missing)?;

    if file.contains("..") || file.contains('/') || file.contains('\\') {
        return Err(FileNameRejection::Traversal);
    }

    Ok(file)
}

// ============================================================================
// Handlers
// ============================================================================

async fn index_handler(State(state): State<AppState>) -> Response {
    let path = state.config.index_file();
    match tokio::fs::read(&path).await {
        Ok(body) => ([(header::CONTENT_TYPE, HTML)], body).into_response(),
        Err(e) => {
            warn!(path = %path.display(), "Failed to read UI index: {e}");
            (StatusCode::NOT_FOUND, "Not found: /").into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "dr-dashboard",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment.tag(),
        "scenarios": state.store.len(),
    }))
}

async fn scenarios_handler(State(state): State<AppState>) -> Response {
    let response = ScenariosResponse {
        environment: state.config.environment.tag(),
        scenarios: state.store.scenarios(),
        discarded_scenarios: state.store.discarded(),
    };

    match serde_json::to_vec(&response) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!("Failed to encode scenarios: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode scenarios").into_response()
        }
    }
}

async fn recovery_process_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let requested = first_file_param(params);
    let file = match validate_file_name(requested.as_deref()) {
        Ok(file) => file,
        Err(rejection) => {
            if rejection == FileNameRejection::Traversal {
                warn!(file = ?requested, "Rejected recovery process file name");
            }
            return (StatusCode::BAD_REQUEST, rejection.message()).into_response();
        }
    };

    let path = state.config.recovery_dir.join(file);
    match tokio::fs::read(&path).await {
        Ok(body) => {
            debug!(file = %file, bytes = body.len(), "Serving recovery process");
            ([(header::CONTENT_TYPE, MARKDOWN)], body).into_response()
        }
        Err(e) => {
            warn!(file = %file, "Recovery process file unavailable: {e}");
            (
                StatusCode::NOT_FOUND,
                format!("Recovery process file not found: {file}"),
            )
                .into_response()
        }
    }
}

/// Router fallback and missing `/static` assets. Names the requested path.
async fn not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, String) {
    warn!(path = %uri.path(), "Resource not found");
    (StatusCode::NOT_FOUND, format!("Not found: {}", uri.path()))
}
