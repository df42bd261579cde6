//! Job identity and status types.
//!
//! The status set is what callers filter on and what job handles report,
//! not a state machine owned by any backend.
//!
//! ```text
//!   QUEUED ──→ RUNNING ──→ DONE
//!     │           │
//!     │           ├──→ ERROR
//!     │           │
//!     └───────────┴──→ CANCELLED
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    /// Job is waiting in queue.
    Queued,
    /// Job is currently running.
    Running,
    /// Job was cancelled.
    Cancelled,
    /// Job completed successfully.
    Done,
    /// Job finished with an error.
    Error,
}

impl JobStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Queued,
        JobStatus::Running,
        JobStatus::Cancelled,
        JobStatus::Done,
        JobStatus::Error,
    ];

    /// The canonical upper-case name of this status.
    pub fn name(self) -> &'static str {
        match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::Running => "RUNNING",
            JobStatus::Cancelled => "CANCELLED",
            JobStatus::Done => "DONE",
            JobStatus::Error => "ERROR",
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Done | JobStatus::Error | JobStatus::Cancelled
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A status name that is not one of [`JobStatus::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized job status name \"{0}\"")]
pub struct ParseJobStatusError(pub String);

impl FromStr for JobStatus {
    type Err = ParseJobStatusError;

    /// Parse a status from its exact upper-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.name() == s)
            .ok_or_else(|| ParseJobStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_terminal() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Error.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_parse_every_name() {
        for status in JobStatus::ALL {
            assert_eq!(status.name().parse::<JobStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_lowercase() {
        let err = "FINISHED".parse::<JobStatus>().unwrap_err();
        assert_eq!(err.0, "FINISHED");
        assert!(err.to_string().contains("FINISHED"));

        assert!("done".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uses_names() {
        let json = serde_json::to_string(&JobStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");
        let back: JobStatus = serde_json::from_str("\"QUEUED\"").unwrap();
        assert_eq!(back, JobStatus::Queued);
    }

    #[test]
    fn test_job_id_display() {
        let id = JobId::from("5c1a2b3c");
        assert_eq!(id.to_string(), "5c1a2b3c");
        assert_eq!(id.as_str(), "5c1a2b3c");
    }
}
