//! The processing seam between the worker pool and whatever actually
//! reads the image bytes.

use async_trait::async_trait;

use snipocr_core::error::CoreError;

/// Processes one job's payload into its result text.
///
/// Implementations must be safe to call concurrently from multiple worker
/// tasks. An `Err` is surfaced to pollers as job state `FAILURE`; the
/// error itself only reaches the log.
#[async_trait]
pub trait RoiProcessor: Send + Sync {
    async fn process(&self, payload: &[u8]) -> Result<String, CoreError>;
}

/// Placeholder recognizer: ignores its input and returns a fixed string.
///
/// Swap this for a real OCR engine without touching the queue, the store,
/// or the endpoints; the job protocol is independent of what the
/// processor computes.
pub struct StubOcr;

#[async_trait]
impl RoiProcessor for StubOcr {
    async fn process(&self, _payload: &[u8]) -> Result<String, CoreError> {
        Ok("Sample OCR result".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_returns_placeholder_text() {
        let result = StubOcr.process(b"anything").await.unwrap();
        assert_eq!(result, "Sample OCR result");
    }
}
