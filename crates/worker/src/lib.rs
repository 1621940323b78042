//! Asynchronous job engine: queue client, job store, and worker pool.
//!
//! Submission enqueues a ticket onto a bounded channel and returns an
//! opaque handle immediately; a pool of Tokio worker tasks drains the
//! channel, runs the processor exactly once per job, and writes a single
//! terminal state into the shared [`JobStore`]. Pollers only ever read.

pub mod pool;
pub mod processor;
pub mod queue;
pub mod store;

pub use pool::WorkerPool;
pub use processor::{RoiProcessor, StubOcr};
pub use queue::{JobQueue, QueueConfig};
pub use store::JobStore;
