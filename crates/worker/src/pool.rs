//! The worker pool.
//!
//! A fixed number of long-lived Tokio tasks share the ticket channel and
//! execute jobs as they arrive. Each job gets exactly one execution
//! attempt and exactly one terminal-state write; there is no built-in
//! retry. All tasks select on a [`CancellationToken`] for graceful
//! shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::processor::RoiProcessor;
use crate::queue::{JobQueue, JobTicket, QueueConfig};
use crate::store::JobStore;

type SharedReceiver = Arc<Mutex<mpsc::Receiver<JobTicket>>>;

/// Handle to the running pool, used for shutdown.
pub struct WorkerPool {
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn the pool and return the submission handle alongside it.
    ///
    /// The returned [`JobQueue`] is the only way to feed the pool; handing
    /// it to the endpoints at construction keeps the wiring explicit.
    pub fn start(
        config: &QueueConfig,
        store: Arc<JobStore>,
        processor: Arc<dyn RoiProcessor>,
    ) -> (JobQueue, WorkerPool) {
        let (tx, rx) = mpsc::channel(config.capacity.max(1));
        let rx: SharedReceiver = Arc::new(Mutex::new(rx));
        let cancel = CancellationToken::new();

        let workers = config.workers.max(1);
        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            handles.push(tokio::spawn(run_worker(
                worker_id,
                Arc::clone(&rx),
                Arc::clone(&store),
                Arc::clone(&processor),
                config.task_timeout,
                cancel.clone(),
            )));
        }

        tracing::info!(
            workers,
            capacity = config.capacity.max(1),
            task_timeout_secs = config.task_timeout.as_secs(),
            "Worker pool started",
        );

        (JobQueue::new(tx, store), WorkerPool { cancel, handles })
    }

    /// Stop accepting ticks and wait for every worker task to exit.
    ///
    /// In-flight jobs are not interrupted beyond their own timeout; each
    /// worker finishes its current job before observing the cancellation.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for handle in self.handles {
            let _ = handle.await;
        }
        tracing::info!("Worker pool shut down");
    }
}

/// One worker task: drain tickets until cancelled or the channel closes.
async fn run_worker(
    worker_id: usize,
    rx: SharedReceiver,
    store: Arc<JobStore>,
    processor: Arc<dyn RoiProcessor>,
    task_timeout: Duration,
    cancel: CancellationToken,
) {
    loop {
        // Hold the receiver lock only while waiting for the next ticket.
        let ticket = {
            let mut rx = rx.lock().await;
            tokio::select! {
                _ = cancel.cancelled() => None,
                ticket = rx.recv() => ticket,
            }
        };

        let Some(ticket) = ticket else {
            break;
        };

        execute(ticket, &store, processor.as_ref(), task_timeout).await;
    }

    tracing::debug!(worker_id, "Worker stopped");
}

/// Run one job to its terminal state.
///
/// The whole attempt runs inside a per-job tracing span: entered before
/// pickup is recorded, dropped on every exit path: success, processor
/// error, and timeout alike.
async fn execute(
    ticket: JobTicket,
    store: &JobStore,
    processor: &dyn RoiProcessor,
    task_timeout: Duration,
) {
    let JobTicket { id, payload } = ticket;
    let span = tracing::info_span!("job", task_id = %id);

    async {
        store.mark_running(id).await;
        let started = tokio::time::Instant::now();

        match tokio::time::timeout(task_timeout, processor.process(&payload)).await {
            Ok(Ok(text)) => {
                store.complete(id, text).await;
                tracing::info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Job completed",
                );
            }
            Ok(Err(e)) => {
                store.fail(id).await;
                tracing::error!(error = %e, "Job failed");
            }
            Err(_) => {
                store.fail(id).await;
                tracing::error!(
                    timeout_secs = task_timeout.as_secs(),
                    "Job timed out, forced into FAILURE",
                );
            }
        }
    }
    .instrument(span)
    .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
