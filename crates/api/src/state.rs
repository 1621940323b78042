use std::sync::Arc;

use snipocr_worker::{JobQueue, JobStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Handlers never construct their own queue client; they receive this one.
#[derive(Clone)]
pub struct AppState {
    /// Submission handle into the worker pool.
    pub queue: JobQueue,
    /// Job store, read by the polling endpoint and swept by retention.
    pub store: Arc<JobStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
