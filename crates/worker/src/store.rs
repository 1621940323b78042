//! In-process job store.
//!
//! Maps job handles to their current [`JobRecord`]. Exactly one writer
//! touches a given job after submission (the worker, once, at completion);
//! everything else is reads. Terminal records are write-once: `complete`
//! and `fail` refuse to modify a job that already reached a terminal
//! state, so a poller can never observe a result without `SUCCESS`.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use snipocr_core::job::{JobRecord, JobState};
use snipocr_core::types::{TaskId, Timestamp};

/// Shared job state, keyed by handle.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared between the API handlers, the worker pool, and the retention
/// sweeper.
pub struct JobStore {
    jobs: RwLock<HashMap<TaskId, JobRecord>>,
}

impl JobStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Register a freshly submitted job in `PENDING` state.
    pub async fn insert_pending(&self, id: TaskId) {
        self.jobs
            .write()
            .await
            .insert(id, JobRecord::pending(Utc::now()));
    }

    /// Remove a job outright. Used to roll back a submission whose enqueue
    /// failed, so that "no job is created on failure" holds.
    pub async fn remove(&self, id: TaskId) {
        self.jobs.write().await.remove(&id);
    }

    /// Mark a job as picked up by a worker.
    ///
    /// No-op if the job is unknown or already terminal.
    pub async fn mark_running(&self, id: TaskId) {
        let mut jobs = self.jobs.write().await;
        if let Some(record) = jobs.get_mut(&id) {
            if !record.state.is_terminal() {
                record.state = JobState::Running;
            }
        }
    }

    /// Write the successful terminal state and its result in one step.
    ///
    /// Returns `false` without mutating anything if the job is unknown or
    /// already terminal.
    pub async fn complete(&self, id: TaskId, result: String) -> bool {
        self.finish(id, JobState::Success, Some(result)).await
    }

    /// Write the failed terminal state. The failure detail belongs in the
    /// log, not the store; pollers see `FAILURE` with a null result.
    pub async fn fail(&self, id: TaskId) -> bool {
        self.finish(id, JobState::Failure, None).await
    }

    async fn finish(&self, id: TaskId, state: JobState, result: Option<String>) -> bool {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&id) {
            Some(record) if !record.state.is_terminal() => {
                record.state = state;
                record.result = result;
                record.finished_at = Some(Utc::now());
                true
            }
            _ => false,
        }
    }

    /// Fetch a snapshot of a job's record. Side-effect-free.
    pub async fn get(&self, id: TaskId) -> Option<JobRecord> {
        self.jobs.read().await.get(&id).cloned()
    }

    /// Number of jobs currently tracked (any state).
    pub async fn job_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Delete terminal jobs that finished before `cutoff`.
    ///
    /// Returns how many records were purged. Pending and running jobs are
    /// never touched.
    pub async fn purge_finished_before(&self, cutoff: Timestamp) -> usize {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, record| match record.finished_at {
            Some(finished_at) => !record.state.is_terminal() || finished_at >= cutoff,
            None => true,
        });
        before - jobs.len()
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
