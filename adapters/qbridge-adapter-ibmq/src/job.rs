//! IBM Q job handle.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use qbridge_hal::{JobId, JobStatus, Qobj};

use crate::api::{IbmqApi, JobInfo};
use crate::error::{IbmqError, IbmqResult};

/// Queue status of a job that has been accepted but not started.
const PENDING_IN_QUEUE: &str = "PENDING_IN_QUEUE";

/// A job on an IBM Q backend.
///
/// Created either unsubmitted (by [`IbmqJob::new`], or by
/// [`IbmqBackend::run`] which also submits it) or from a job record
/// returned by the service (listing and retrieval).
///
/// [`IbmqBackend::run`]: crate::IbmqBackend::run
pub struct IbmqJob {
    /// Name of the backend the job runs on.
    backend_name: String,
    /// Shared API client.
    api: Arc<dyn IbmqApi>,
    /// Remote job ID, once submitted.
    id: Option<JobId>,
    /// Payload, for jobs created locally.
    qobj: Option<Qobj>,
    /// Remote creation time.
    creation_date: Option<DateTime<Utc>>,
    /// Last raw status reported by the service.
    api_status: Option<String>,
    /// Last queue status reported by the service.
    queue_status: Option<String>,
}

impl fmt::Debug for IbmqJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmqJob")
            .field("backend_name", &self.backend_name)
            .field("id", &self.id)
            .field("creation_date", &self.creation_date)
            .field("api_status", &self.api_status)
            .finish_non_exhaustive()
    }
}

impl IbmqJob {
    /// Create a job that has not been submitted yet.
    pub fn new(backend_name: impl Into<String>, api: Arc<dyn IbmqApi>, qobj: Qobj) -> Self {
        Self {
            backend_name: backend_name.into(),
            api,
            id: None,
            qobj: Some(qobj),
            creation_date: None,
            api_status: None,
            queue_status: None,
        }
    }

    /// Create a handle for a job the service already knows.
    pub(crate) fn from_info(
        backend_name: impl Into<String>,
        api: Arc<dyn IbmqApi>,
        info: &JobInfo,
    ) -> Self {
        Self {
            backend_name: backend_name.into(),
            api,
            id: info.id.clone().map(JobId),
            qobj: None,
            creation_date: info.creation_date,
            api_status: info.status.clone(),
            queue_status: info.queue_status().map(str::to_string),
        }
    }

    /// Remote job ID, if the job has been submitted.
    pub fn id(&self) -> Option<&JobId> {
        self.id.as_ref()
    }

    /// Name of the backend the job runs on.
    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Creation time reported by the service.
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    /// Last raw status reported by the service.
    pub fn api_status(&self) -> Option<&str> {
        self.api_status.as_deref()
    }

    /// Payload of a locally created job.
    pub fn qobj(&self) -> Option<&Qobj> {
        self.qobj.as_ref()
    }

    /// Status derived from the last known remote status.
    ///
    /// `None` before submission or when the service reported a status
    /// this client does not know.
    pub fn status(&self) -> Option<JobStatus> {
        map_api_status(self.api_status.as_deref()?, self.queue_status.as_deref())
    }

    /// Submit the job's Qobj to its backend.
    pub async fn submit(&mut self) -> IbmqResult<()> {
        if let Some(id) = &self.id {
            return Err(IbmqError::JobSubmission(format!(
                "job {id} has already been submitted"
            )));
        }
        let qobj = self
            .qobj
            .as_ref()
            .ok_or_else(|| IbmqError::JobSubmission("job has no qobj to submit".into()))?;

        let info = self.api.submit_job(&self.backend_name, qobj).await?;

        if let Some(message) = info.error_message() {
            return Err(IbmqError::JobSubmission(message));
        }
        let id = info
            .id
            .clone()
            .ok_or_else(|| IbmqError::JobSubmission("response carries no job id".into()))?;

        tracing::info!(job_id = %id, backend = %self.backend_name, "job submitted");
        self.id = Some(JobId(id));
        self.update(&info);
        Ok(())
    }

    /// Fetch the job record again and update the cached status.
    ///
    /// A record carrying an error leaves the cached status untouched.
    pub async fn refresh(&mut self) -> IbmqResult<Option<JobStatus>> {
        let id = self.require_id()?;
        let info = self.api.get_job(id.as_str()).await?;

        if let Some(message) = info.error_message() {
            return Err(IbmqError::job_retrieval(id.as_str(), message));
        }

        self.update(&info);
        Ok(self.status())
    }

    /// Ask the service to cancel the job.
    pub async fn cancel(&self) -> IbmqResult<()> {
        let id = self.require_id()?;
        self.api.cancel_job(id.as_str()).await?;
        tracing::info!(job_id = %id, "job cancellation requested");
        Ok(())
    }

    fn require_id(&self) -> IbmqResult<&JobId> {
        self.id
            .as_ref()
            .ok_or_else(|| IbmqError::InvalidParameter("job has not been submitted".into()))
    }

    fn update(&mut self, info: &JobInfo) {
        if info.creation_date.is_some() {
            self.creation_date = info.creation_date;
        }
        if info.status.is_some() {
            self.api_status = info.status.clone();
        }
        self.queue_status = info.queue_status().map(str::to_string);
    }
}

/// Map a raw remote status onto [`JobStatus`].
///
/// The service reports queued jobs as `RUNNING` with a pending queue
/// entry; error statuses all start with `ERROR`.
pub fn map_api_status(api_status: &str, queue_status: Option<&str>) -> Option<JobStatus> {
    match api_status {
        "COMPLETED" => Some(JobStatus::Done),
        "CANCELLED" => Some(JobStatus::Cancelled),
        "RUNNING" if queue_status == Some(PENDING_IN_QUEUE) => Some(JobStatus::Queued),
        "RUNNING" => Some(JobStatus::Running),
        "QUEUED" | "VALIDATING" | "INITIALIZING" => Some(JobStatus::Queued),
        s if s.starts_with("ERROR") => Some(JobStatus::Error),
        other => {
            tracing::debug!("unknown remote job status {other}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_api_status() {
        assert_eq!(map_api_status("COMPLETED", None), Some(JobStatus::Done));
        assert_eq!(map_api_status("CANCELLED", None), Some(JobStatus::Cancelled));
        assert_eq!(map_api_status("RUNNING", None), Some(JobStatus::Running));
        assert_eq!(
            map_api_status("RUNNING", Some("PENDING_IN_QUEUE")),
            Some(JobStatus::Queued)
        );
        assert_eq!(map_api_status("VALIDATING", None), Some(JobStatus::Queued));
        assert_eq!(
            map_api_status("ERROR_RUNNING_JOB", None),
            Some(JobStatus::Error)
        );
        assert_eq!(
            map_api_status("ERROR_VALIDATING_JOB", None),
            Some(JobStatus::Error)
        );
        assert_eq!(map_api_status("ARCHIVED", None), None);
    }
}
