//! Handlers for ROI submission and result polling.
//!
//! Submission validates and decodes the payload at the boundary; nothing
//! malformed or oversized ever reaches the queue. Polling is a pure read
//! of the job store.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use snipocr_core::job::JobState;
use snipocr_core::roi::{decode_data_url, RoiRegion};
use snipocr_core::types::TaskId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

/// Body of `POST /process_roi`.
#[derive(Debug, Deserialize)]
pub struct ProcessRoiRequest {
    /// Region coordinates of the crop.
    #[serde(flatten)]
    pub region: RoiRegion,
    /// Data URL carrying the cropped image (`data:<mime>;base64,...`).
    pub image_data: String,
}

/// `202 Accepted` body: the handle to poll with.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub task_id: TaskId,
}

/// Body of `GET /get_ocr_result/{task_id}`.
#[derive(Debug, Serialize)]
pub struct TaskStatusResponse {
    pub state: JobState,
    pub result: Option<String>,
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /process_roi
///
/// Validate the request, decode the image payload, and enqueue one job.
/// Returns 202 with the job handle. Validation and decode failures return
/// 400 with a diagnostic; in either case no job is created.
pub async fn process_roi(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRoiRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    // Malformed JSON and missing fields become the caller's problem, not
    // a framework-shaped rejection.
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let img_bytes = decode_data_url(&request.image_data)?;

    let task_id = state.queue.submit(img_bytes).await?;

    let RoiRegion { x, y, w, h } = request.region;
    tracing::info!(task_id = %task_id, x, y, w, h, "ROI job accepted");

    Ok((StatusCode::ACCEPTED, Json(SubmitResponse { task_id })))
}

// ---------------------------------------------------------------------------
// Poll
// ---------------------------------------------------------------------------

/// GET /get_ocr_result/{task_id}
///
/// Report the job's current state. A handle the store does not know
/// (never issued, not yet started, or already swept) reads as `PENDING`
/// with a null result, indistinguishable from a queued job. `SUCCESS`
/// carries the stored result; every other state reports `result: null`.
/// Side-effect-free and idempotent.
pub async fn get_ocr_result(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Json<TaskStatusResponse> {
    let record = match task_id.parse::<TaskId>() {
        Ok(id) => state.store.get(id).await,
        // A handle that is not even a UUID cannot be in the store; it
        // polls the same as any other unknown handle.
        Err(_) => None,
    };

    let response = match record {
        Some(record) => TaskStatusResponse {
            state: record.state,
            result: record.result,
        },
        None => TaskStatusResponse {
            state: JobState::Pending,
            result: None,
        },
    };

    Json(response)
}
