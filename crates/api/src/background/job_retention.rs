//! Periodic cleanup of finished jobs.
//!
//! Spawns a background task that removes terminal job records older than
//! the configured retention period, so the store does not grow without
//! bound. Runs on a fixed interval using `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use snipocr_worker::JobStore;

/// Default retention period: 24 hours.
const DEFAULT_RETENTION_HOURS: i64 = 24;

/// How often the cleanup job runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the job retention cleanup loop.
///
/// Purges terminal jobs older than `retention_hours` (defaults to 24).
/// Pending and running jobs are never touched. Runs until `cancel` is
/// triggered.
pub async fn run(store: Arc<JobStore>, cancel: CancellationToken) {
    let retention_hours: i64 = std::env::var("JOB_RETENTION_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RETENTION_HOURS);

    tracing::info!(
        retention_hours,
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Job retention sweeper started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Job retention sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::hours(retention_hours);
                let purged = store.purge_finished_before(cutoff).await;
                if purged > 0 {
                    tracing::info!(purged, "Job retention: purged finished jobs");
                } else {
                    tracing::debug!("Job retention: nothing to purge");
                }
            }
        }
    }
}
