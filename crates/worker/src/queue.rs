//! Job submission client.
//!
//! [`JobQueue`] is the handle endpoints receive at construction. Submitting
//! generates the job handle, registers the `PENDING` record, and pushes a
//! ticket onto the bounded channel the worker pool drains. The call never
//! waits for execution.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use uuid::Uuid;

use snipocr_core::error::CoreError;
use snipocr_core::types::TaskId;

use crate::store::JobStore;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Engine settings, passed explicitly at construction.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Number of worker tasks draining the queue.
    pub workers: usize,
    /// Bounded channel capacity. A full channel fails the submission
    /// rather than blocking the request.
    pub capacity: usize,
    /// Per-job execution budget. A job still running past this is forced
    /// into `FAILURE`.
    pub task_timeout: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            capacity: 256,
            task_timeout: Duration::from_secs(60),
        }
    }
}

// ---------------------------------------------------------------------------
// Queue client
// ---------------------------------------------------------------------------

/// One unit of queued work: the handle plus the decoded image bytes.
/// The payload is owned by the ticket until the worker consumes it and is
/// never persisted beyond the job's execution.
pub(crate) struct JobTicket {
    pub id: TaskId,
    pub payload: Vec<u8>,
}

/// Cheaply cloneable submission handle.
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::Sender<JobTicket>,
    store: Arc<JobStore>,
}

impl JobQueue {
    pub(crate) fn new(tx: mpsc::Sender<JobTicket>, store: Arc<JobStore>) -> Self {
        Self { tx, store }
    }

    /// Submit decoded image bytes for background processing.
    ///
    /// Returns the newly issued handle immediately after enqueue. If the
    /// queue is full or the pool has shut down, the freshly inserted
    /// `PENDING` record is rolled back and an internal error is returned;
    /// a failed submission leaves no trace in the store.
    pub async fn submit(&self, payload: Vec<u8>) -> Result<TaskId, CoreError> {
        let id = Uuid::new_v4();
        self.store.insert_pending(id).await;

        if let Err(e) = self.tx.try_send(JobTicket { id, payload }) {
            self.store.remove(id).await;
            return Err(CoreError::Internal(format!("job queue unavailable: {e}")));
        }

        Ok(id)
    }

    /// Whether the worker pool is still accepting work.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}
