// GET /api/dashboard, GET /api/devices

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Deserializer};

use super::error::ApiError;
use super::{ApiResponse, AppState};
use crate::telemetry_repo::DashboardQuery;

/// Ten years.
const MAX_HOURS: u32 = 24 * 365 * 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DashboardParams {
    device_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    hours: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    limit: Option<u32>,
}

/// `hours=` with no value falls back to the default like an absent parameter.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid number {:?}: {}", s, e))),
        _ => Ok(None),
    }
}

pub(super) async fn dashboard_handler(
    State(state): State<AppState>,
    params: Result<Query<DashboardParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let cfg = &state.config.dashboard;

    let hours = params.hours.unwrap_or(cfg.default_hours);
    if hours == 0 || hours > MAX_HOURS {
        return Err(ApiError::BadRequest(format!(
            "hours must be between 1 and {}",
            MAX_HOURS
        )));
    }
    let limit = params.limit.unwrap_or(cfg.default_limit).clamp(1, cfg.max_limit);
    let device_id = params.device_id.filter(|id| !id.is_empty());

    let query = DashboardQuery {
        device_id,
        hours,
        limit,
        top_processes: cfg.top_process_count,
    };
    match state.repo.dashboard(&query, chrono::Utc::now()).await? {
        Some(data) => Ok(Json(ApiResponse::ok(data))),
        None => Err(ApiError::NotFound(format!(
            "device {} not found",
            query.device_id.unwrap_or_default()
        ))),
    }
}

pub(super) async fn devices_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let devices = state.repo.list_devices().await?;
    Ok(Json(ApiResponse::ok(devices)))
}
