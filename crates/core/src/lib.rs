//! Domain types for the snipocr service.
//!
//! Pure types and functions shared by the worker engine and the API:
//! the job state machine, ROI payload validation/decoding, and the
//! domain error taxonomy. This crate has no runtime dependencies so it
//! stays cheap to test and reuse.

pub mod error;
pub mod job;
pub mod roi;
pub mod types;
