//! Job-listing query construction.
//!
//! The job-listing endpoint takes a loopback-style `where` document. A
//! [`JobQuery`] is turned into one by layering three predicate sets:
//!
//! ```text
//!   db_filter (caller, raw)      lowest precedence
//!   backend.name = <backend>
//!   status predicates            highest precedence
//! ```
//!
//! The status and backend predicates always win over the caller's raw
//! filter when both name the same key.

use serde::Serialize;
use serde_json::{Map, Value, json};

use qbridge_hal::JobStatus;

use crate::error::{IbmqError, IbmqResult};

/// Default number of jobs returned by a listing.
pub const DEFAULT_LIMIT: usize = 50;

/// Key of the backend-name predicate.
pub const BACKEND_NAME_KEY: &str = "backend.name";

/// Remote `where` predicate for job listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JobFilter(Map<String, Value>);

impl JobFilter {
    /// Filter matching every job of one backend.
    pub fn for_backend(backend_name: &str) -> Self {
        let mut map = Map::new();
        map.insert(BACKEND_NAME_KEY.to_string(), Value::from(backend_name));
        Self(map)
    }

    /// Merge the predicates for `status`, overwriting existing keys.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.0.extend(status_predicate(status));
        self
    }

    /// Lay a caller-supplied raw filter underneath this one.
    ///
    /// Keys already present in `self` keep their value.
    pub fn over(self, raw: Map<String, Value>) -> Self {
        let mut merged = raw;
        merged.extend(self.0);
        Self(merged)
    }

    /// Predicate for a key, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of top-level predicates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the filter has no predicates.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

impl From<Map<String, Value>> for JobFilter {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Remote predicates selecting jobs in `status`.
///
/// The service has no distinct queued state: a queued job is a `RUNNING`
/// job whose queue info is still pending, and a running one has no queue
/// info at all.
pub fn status_predicate(status: JobStatus) -> Map<String, Value> {
    match status {
        JobStatus::Running => predicate([
            ("status", json!("RUNNING")),
            ("infoQueue", json!({"exists": false})),
        ]),
        JobStatus::Queued => predicate([
            ("status", json!("RUNNING")),
            ("infoQueue.status", json!("PENDING_IN_QUEUE")),
        ]),
        JobStatus::Cancelled => predicate([("status", json!("CANCELLED"))]),
        JobStatus::Done => predicate([("status", json!("COMPLETED"))]),
        JobStatus::Error => predicate([("status", json!({"regexp": "^ERROR"}))]),
    }
}

fn predicate<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// A status given either as an enum value or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSelector {
    /// A known status.
    Status(JobStatus),
    /// A status name, resolved when the query is built.
    Name(String),
}

impl StatusSelector {
    /// Resolve to a [`JobStatus`]. An empty name selects no status.
    pub fn resolve(&self) -> IbmqResult<Option<JobStatus>> {
        match self {
            StatusSelector::Status(status) => Ok(Some(*status)),
            StatusSelector::Name(name) if name.is_empty() => Ok(None),
            StatusSelector::Name(name) => name.parse().map(Some).map_err(|_| {
                IbmqError::BackendValue(format!(
                    "unrecognized value for \"status\" keyword in job filter: \"{name}\""
                ))
            }),
        }
    }
}

impl From<JobStatus> for StatusSelector {
    fn from(status: JobStatus) -> Self {
        StatusSelector::Status(status)
    }
}

impl From<&str> for StatusSelector {
    fn from(name: &str) -> Self {
        StatusSelector::Name(name.to_string())
    }
}

impl From<String> for StatusSelector {
    fn from(name: String) -> Self {
        StatusSelector::Name(name)
    }
}

/// Parameters of a job listing.
#[derive(Debug, Clone, PartialEq)]
pub struct JobQuery {
    /// Maximum number of jobs to return.
    pub limit: usize,
    /// Number of jobs to skip (pagination offset).
    pub skip: usize,
    /// Only return jobs in this status.
    pub status: Option<StatusSelector>,
    /// Raw loopback `where` predicates, e.g.
    /// `{"creationDate": {"lt": "2019-03-01T00:00:00Z"}}`.
    pub db_filter: Option<Map<String, Value>>,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
            status: None,
            db_filter: None,
        }
    }
}

impl JobQuery {
    /// Query with default limit and offset and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of jobs.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the pagination offset.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Only return jobs in `status`.
    pub fn status(mut self, status: impl Into<StatusSelector>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Add raw `where` predicates.
    pub fn db_filter(mut self, filter: Map<String, Value>) -> Self {
        self.db_filter = Some(filter);
        self
    }

    /// Build the remote filter for jobs of `backend_name`.
    pub fn to_filter(&self, backend_name: &str) -> IbmqResult<JobFilter> {
        let mut filter = JobFilter::for_backend(backend_name);

        if let Some(selector) = &self.status {
            if let Some(status) = selector.resolve()? {
                filter = filter.with_status(status);
            }
        }

        if let Some(raw) = &self.db_filter {
            filter = filter.over(raw.clone());
        }

        Ok(filter)
    }
}
