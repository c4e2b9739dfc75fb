// POST /api/telemetry, POST /api/telemetry/batch, GET /api/readings/{id}

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};

use super::error::ApiError;
use super::{ApiResponse, AppState};
use crate::ingest::{validate_batch, validate_submission};
use crate::models::{Acknowledgment, BatchAcknowledgment, RawBatch, RawSubmission};

pub(super) async fn submit_handler(
    State(state): State<AppState>,
    payload: Result<Json<RawSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(raw) = payload?;
    let submission = validate_submission(raw).map_err(ApiError::validation)?;
    let stored = state.repo.record_submission(&submission).await?;
    tracing::info!(
        device = %submission.device_id,
        tier = %submission.tier(),
        reading_id = stored.reading_id,
        "telemetry received"
    );
    let ack = Acknowledgment {
        received: true,
        id: stored.reading_id.to_string(),
        timestamp: submission.timestamp_raw,
    };
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(ack))))
}

pub(super) async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<RawBatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(raw) = payload?;
    let submissions = validate_batch(raw, state.config.ingest.max_batch_size)
        .map_err(ApiError::validation)?;
    let stored = state.repo.record_batch(&submissions).await?;
    tracing::info!(received = stored.len(), "telemetry batch received");
    let ack = BatchAcknowledgment {
        received: stored.len(),
        failed: submissions.len() - stored.len(),
        ids: stored.iter().map(|s| s.reading_id.to_string()).collect(),
    };
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(ack))))
}

pub(super) async fn reading_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    match state.repo.reading_summary(id).await? {
        Some(summary) => Ok(Json(ApiResponse::ok(summary))),
        None => Err(ApiError::NotFound(format!("reading {} not found", id))),
    }
}
