//! SyncWatch Web API Server
//!
//! Read-only REST API over the log catalog, tail reads, downloads, and the
//! sync status.

mod dashboard;
mod error;

pub use dashboard::{build_dashboard, Dashboard, EMPTY_CATALOG_NOTICE};
pub use error::{ApiError, ApiResult};

use axum::{
    body::Body,
    extract::{Path, Query, Request as AxumRequest, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response as AxumResponse},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use syncwatch_core::{
    normalize_log_key, Cache, Config, Error, MemoryCache, DASHBOARD_TAIL_LINES,
    DOWNLOAD_CHUNK_BYTES,
};
use syncwatch_health::StatusMonitor;
use syncwatch_logs::LogRegistry;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;
use tower_http::trace::TraceLayer;
use tracing::info;

/// API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    registry: Arc<LogRegistry>,
    monitor: Arc<StatusMonitor>,
    api_key: Option<String>,
}

impl AppState {
    /// Build both components over one shared in-memory cache
    pub fn new(config: &Config) -> Self {
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
        Self::with_components(
            LogRegistry::new(config, Arc::clone(&cache)),
            StatusMonitor::new(config, cache),
            config.web.api_key.clone(),
        )
    }

    pub fn with_components(
        registry: LogRegistry,
        monitor: StatusMonitor,
        api_key: Option<String>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            monitor: Arc::new(monitor),
            api_key,
        }
    }
}

/// API key authentication middleware
async fn api_key_auth(
    State(state): State<AppState>,
    request: AxumRequest,
    next: Next,
) -> Result<AxumResponse, StatusCode> {
    // If no API key is configured, allow all requests
    let Some(expected_key) = &state.api_key else {
        return Ok(next.run(request).await);
    };

    let provided_key = request
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok());

    match provided_key {
        Some(key) if key == expected_key => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub log: Option<String>,
    pub lines: Option<usize>,
}

#[derive(Deserialize)]
pub struct TailQuery {
    pub lines: Option<usize>,
}

#[derive(Serialize)]
pub struct TailBody {
    pub key: String,
    pub content: String,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/logs", get(list_logs))
        .route("/api/logs/:key/tail", get(tail_log))
        .route("/api/logs/:key/download", get(download_log))
        .route("/api/status", get(sync_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), api_key_auth));

    let public_routes = Router::new().route("/api/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server
pub async fn start_server(config: &Config) -> std::io::Result<()> {
    let state = AppState::new(config);
    let app = create_router(state);

    info!("Starting SyncWatch Web API on {}", config.web.bind);
    if config.web.api_key.is_none() {
        tracing::warn!("No API key configured; the API is unauthenticated");
    }

    let listener = tokio::net::TcpListener::bind(&config.web.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run blocking filesystem work off the async runtime
async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}

// === API Handlers ===

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<ApiResponse<Dashboard>>> {
    let lines = query.lines.unwrap_or(DASHBOARD_TAIL_LINES);
    let view = blocking(move || {
        build_dashboard(&state.registry, &state.monitor, query.log.as_deref(), lines)
    })
    .await?;
    Ok(Json(ApiResponse::ok(view)))
}

async fn list_logs(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let catalog = blocking(move || state.registry.get_catalog()).await?;
    Ok(Json(ApiResponse::ok(catalog)))
}

async fn tail_log(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<TailQuery>,
) -> ApiResult<impl IntoResponse> {
    let key = normalize_log_key(&key);
    let lines = query.lines.unwrap_or(DASHBOARD_TAIL_LINES);

    let lookup = key.clone();
    let content = blocking(move || state.registry.tail_key(&lookup, lines)).await??;
    Ok(Json(ApiResponse::ok(TailBody { key, content })))
}

async fn sync_status(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let status = blocking(move || state.monitor.get_status()).await?;
    Ok(Json(ApiResponse::ok(status)))
}

async fn download_log(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<AxumResponse> {
    let key = normalize_log_key(&key);
    let download = blocking(move || state.registry.prepare_download(&key)).await??;

    let file = tokio::fs::File::open(&download.path)
        .await
        .map_err(|_| Error::Unreadable(download.path.clone()))?;

    // Never send more than the length we announce
    let stream = ReaderStream::with_capacity(file.take(download.size), DOWNLOAD_CHUNK_BYTES);
    let file_name = download.file_name.replace(['"', '\\'], "_");

    info!("Serving download {} ({} bytes)", download.path.display(), download.size);

    AxumResponse::builder()
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .header(header::CONTENT_LENGTH, download.size)
        .header(header::CACHE_CONTROL, "no-cache, must-revalidate")
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
