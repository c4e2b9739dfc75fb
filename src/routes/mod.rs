// HTTP routes

mod dashboard;
pub mod error;
mod http;
mod telemetry;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::telemetry_repo::TelemetryRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repo: Arc<TelemetryRepo>,
    pub(crate) config: AppConfig,
    pub(crate) started_at: Instant,
}

/// Success envelope: `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

pub fn app(repo: Arc<TelemetryRepo>, config: AppConfig) -> Router {
    let body_limit = config.server.max_body_bytes;
    let state = AppState {
        repo,
        config,
        started_at: Instant::now(),
    };
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/health", get(http::health_handler)) // GET /api/health
        .route("/api/telemetry", post(telemetry::submit_handler)) // POST /api/telemetry
        .route("/api/telemetry/batch", post(telemetry::batch_handler)) // POST /api/telemetry/batch
        .route("/api/readings/{id}", get(telemetry::reading_handler)) // GET /api/readings/{id}
        .route("/api/dashboard", get(dashboard::dashboard_handler)) // GET /api/dashboard
        .route("/api/devices", get(dashboard::devices_handler)) // GET /api/devices
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .with_state(state)
}
