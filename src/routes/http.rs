// GET handlers: version, health

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use super::{ApiResponse, AppState};
use crate::version::{NAME, VERSION};

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthData {
    status: &'static str,
    database: &'static str,
    /// Seconds since the router was built.
    uptime: u64,
    version: &'static str,
}

/// GET /api/health: always 200, database state is reported in the body.
pub(super) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, database) = match state.repo.ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unreachable");
            ("unhealthy", "disconnected")
        }
    };
    Json(ApiResponse::ok(HealthData {
        status,
        database,
        uptime: state.started_at.elapsed().as_secs(),
        version: VERSION,
    }))
}
