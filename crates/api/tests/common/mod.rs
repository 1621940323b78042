use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use snipocr_api::config::ServerConfig;
use snipocr_api::router::build_app_router;
use snipocr_api::state::AppState;
use snipocr_worker::{JobStore, StubOcr, WorkerPool};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a small worker pool, and a short per-job timeout so tests stay fast.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        worker_count: 2,
        queue_capacity: 16,
        task_timeout_secs: 5,
    }
}

/// Build the full application router with all middleware layers, plus a
/// handle on the underlying job store so tests can assert on its contents.
///
/// This mirrors the wiring in `main.rs` (worker pool, queue, state,
/// middleware stack) so integration tests exercise the same stack that
/// production uses. The pool handle is deliberately dropped; its worker
/// tasks keep running on the test runtime.
pub fn build_test_app_with_store() -> (Router, Arc<JobStore>) {
    let config = test_config();
    let store = Arc::new(JobStore::new());

    let (queue, _pool) = WorkerPool::start(
        &config.queue_config(),
        Arc::clone(&store),
        Arc::new(StubOcr),
    );

    let state = AppState {
        queue,
        store: Arc::clone(&store),
        config: Arc::new(config.clone()),
    };

    (build_app_router(state, &config), store)
}

/// Build the full application router when the test does not need the store.
pub fn build_test_app() -> Router {
    build_test_app_with_store().0
}

/// Drive a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Drive a POST request with a JSON body through the router.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
