//! Job lifecycle types.
//!
//! A job is created at submission, executed at most once by a worker, and
//! ends in exactly one terminal state. The record stored per handle is the
//! single source of truth for pollers.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// JobState
// ---------------------------------------------------------------------------

/// Client-visible job state.
///
/// Lifecycle: `Pending -> Running -> Success | Failure`. The two terminal
/// states never change once written. Serialized in SCREAMING_SNAKE_CASE on
/// the wire (`"PENDING"`, `"RUNNING"`, `"SUCCESS"`, `"FAILURE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Pending,
    Running,
    Success,
    Failure,
}

impl JobState {
    /// Whether this state is terminal. A terminal record is immutable;
    /// clients should stop polling once they observe one.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Success | JobState::Failure)
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobState::Pending => "PENDING",
            JobState::Running => "RUNNING",
            JobState::Success => "SUCCESS",
            JobState::Failure => "FAILURE",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// JobRecord
// ---------------------------------------------------------------------------

/// What the job store keeps per handle.
///
/// `result` is populated exactly when the transition into `Success`
/// happens and never afterwards; a poller can therefore never observe a
/// result without also observing `Success`.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub state: JobState,
    pub result: Option<String>,
    pub created_at: Timestamp,
    /// Set on the terminal transition. Drives retention sweeping.
    pub finished_at: Option<Timestamp>,
}

impl JobRecord {
    /// A freshly submitted job: pending, no result.
    pub fn pending(created_at: Timestamp) -> Self {
        Self {
            state: JobState::Pending,
            result: None,
            created_at,
            finished_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_serialize_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&JobState::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&JobState::Running).unwrap(),
            "\"RUNNING\""
        );
        assert_eq!(
            serde_json::to_string(&JobState::Success).unwrap(),
            "\"SUCCESS\""
        );
        assert_eq!(
            serde_json::to_string(&JobState::Failure).unwrap(),
            "\"FAILURE\""
        );
    }

    #[test]
    fn only_success_and_failure_are_terminal() {
        assert!(!JobState::Pending.is_terminal());
        assert!(!JobState::Running.is_terminal());
        assert!(JobState::Success.is_terminal());
        assert!(JobState::Failure.is_terminal());
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(JobState::Pending.to_string(), "PENDING");
        assert_eq!(JobState::Failure.to_string(), "FAILURE");
    }

    #[test]
    fn pending_record_has_no_result() {
        let record = JobRecord::pending(chrono::Utc::now());
        assert_eq!(record.state, JobState::Pending);
        assert!(record.result.is_none());
        assert!(record.finished_at.is_none());
    }
}
