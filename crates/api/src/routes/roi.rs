//! Route definitions for the ROI task pipeline.
//!
//! Both endpoints are unauthenticated; the paths match what the browser
//! client calls.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::roi;
use crate::state::AppState;

/// Routes mounted at the application root.
///
/// ```text
/// POST   /process_roi                 -> process_roi
/// GET    /get_ocr_result/{task_id}    -> get_ocr_result
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process_roi", post(roi::process_roi))
        .route("/get_ocr_result/{task_id}", get(roi::get_ocr_result))
}
