//! # HTTP API
//!
//! axum routes over the aspect service.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | GET  | `/health` | |
//! | GET  | `/api/editing/aspects` | |
//! | GET  | `/api/editing/aspects/overview` | |
//! | GET  | `/api/editing/aspects/{key}/fields` | |
//! | POST | `/api/editing/progress` | video record |
//! | POST | `/api/editing/validate` | video record |

use crate::config::ServerConfig;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use vidtrack_core::{
    AspectDescriptor, AspectDetail, AspectError, AspectService, AspectSummary, FieldIssue,
    RecordProgress, Video,
};

// =============================================================================
// STATE
// =============================================================================

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<AspectService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: AspectService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AspectsResponse {
    pub aspects: Vec<AspectDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub aspects: Vec<AspectSummary>,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub issues: Vec<FieldIssue>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Aspect(#[from] AspectError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Aspect(AspectError::NotFound { .. }) => StatusCode::NOT_FOUND,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the router with tracing and CORS layers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/editing/aspects", get(aspects_handler))
        .route("/api/editing/aspects/overview", get(overview_handler))
        .route("/api/editing/aspects/{key}/fields", get(fields_handler))
        .route("/api/editing/progress", post(progress_handler))
        .route("/api/editing/validate", post(validate_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let addr = config
        .socket_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let aspects = state.service.full_aspects();
    info!(
        "Serving {} aspects / {} fields on http://{}",
        aspects.len(),
        aspects.iter().map(|a| a.fields.len()).sum::<usize>(),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("Could not install Ctrl-C handler; shutting down");
        return;
    }
    info!("Shutdown signal received");
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn aspects_handler(State(state): State<AppState>) -> Json<AspectsResponse> {
    debug!("Serving full aspect metadata");
    Json(AspectsResponse {
        aspects: state.service.full_aspects().to_vec(),
    })
}

async fn overview_handler(State(state): State<AppState>) -> Json<OverviewResponse> {
    debug!("Serving aspect overview");
    Json(OverviewResponse {
        aspects: state.service.aspects_overview(),
    })
}

async fn fields_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<AspectDetail>, ApiError> {
    match state.service.aspect_fields(&key) {
        Ok(detail) => {
            debug!("Serving {} fields of '{}'", detail.fields.len(), key);
            Ok(Json(detail))
        }
        Err(e) => {
            warn!("Unknown aspect requested: {}", key);
            Err(e.into())
        }
    }
}

async fn progress_handler(
    State(state): State<AppState>,
    Json(video): Json<Video>,
) -> Json<RecordProgress> {
    let progress = state.service.progress(&video);
    debug!(
        "Progress for '{}': {}/{}",
        video.name, progress.completed_field_count, progress.total_field_count
    );
    Json(progress)
}

async fn validate_handler(
    State(state): State<AppState>,
    Json(video): Json<Video>,
) -> Json<ValidationResponse> {
    let issues = state.service.validate(&video);
    debug!("Validated '{}': {} issue(s)", video.name, issues.len());
    Json(ValidationResponse {
        valid: issues.is_empty(),
        issues,
    })
}

// =============================================================================
// TESTS
// =============================================================================
