use std::time::Duration;

use snipocr_worker::QueueConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Number of worker tasks draining the job queue (default: `4`).
    pub worker_count: usize,
    /// Bounded job queue capacity (default: `256`).
    pub queue_capacity: usize,
    /// Per-job execution budget in seconds (default: `60`).
    pub task_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `WORKER_COUNT`         | `4`                        |
    /// | `QUEUE_CAPACITY`       | `256`                      |
    /// | `TASK_TIMEOUT_SECS`    | `60`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let worker_count: usize = std::env::var("WORKER_COUNT")
            .unwrap_or_else(|_| "4".into())
            .parse()
            .expect("WORKER_COUNT must be a valid usize");

        let queue_capacity: usize = std::env::var("QUEUE_CAPACITY")
            .unwrap_or_else(|_| "256".into())
            .parse()
            .expect("QUEUE_CAPACITY must be a valid usize");

        let task_timeout_secs: u64 = std::env::var("TASK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("TASK_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            worker_count,
            queue_capacity,
            task_timeout_secs,
        }
    }

    /// The engine settings derived from this configuration.
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            workers: self.worker_count,
            capacity: self.queue_capacity,
            task_timeout: Duration::from_secs(self.task_timeout_secs),
        }
    }
}
