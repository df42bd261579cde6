//! IBM Q backend handle.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use qbridge_hal::{
    Backend, BackendConfiguration, BackendProperties, BackendStatus, HalResult, PulseDefaults,
    Qobj,
};

use crate::api::IbmqApi;
use crate::credentials::Credentials;
use crate::error::{IbmqError, IbmqResult};
use crate::filter::JobQuery;
use crate::job::IbmqJob;

/// Target of deprecation warnings about pre-Qobj jobs.
pub const DEPRECATION_TARGET: &str = "qbridge::deprecation";

/// Handle for one remote IBM Q backend.
///
/// Holds the backend's configuration, the hub/group/project it was
/// obtained through, and a shared API client. Every operation is a single
/// round-trip through that client.
pub struct IbmqBackend {
    /// Static configuration.
    configuration: BackendConfiguration,
    /// Shared API client.
    api: Arc<dyn IbmqApi>,
    /// Hub from the credentials.
    hub: Option<String>,
    /// Group from the credentials.
    group: Option<String>,
    /// Project from the credentials.
    project: Option<String>,
}

impl IbmqBackend {
    /// Create a handle for the backend described by `configuration`.
    pub fn new(
        configuration: BackendConfiguration,
        credentials: &Credentials,
        api: Arc<dyn IbmqApi>,
    ) -> Self {
        Self {
            configuration,
            api,
            hub: credentials.hub.clone(),
            group: credentials.group.clone(),
            project: credentials.project.clone(),
        }
    }

    /// Backend name.
    pub fn name(&self) -> &str {
        &self.configuration.backend_name
    }

    /// Static configuration.
    pub fn configuration(&self) -> &BackendConfiguration {
        &self.configuration
    }

    /// Hub the handle was obtained through.
    pub fn hub(&self) -> Option<&str> {
        self.hub.as_deref()
    }

    /// Group the handle was obtained through.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Project the handle was obtained through.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Submit a Qobj and return the submitted job.
    pub async fn run(&self, qobj: Qobj) -> IbmqResult<IbmqJob> {
        let mut job = IbmqJob::new(self.name(), Arc::clone(&self.api), qobj);
        job.submit().await?;
        Ok(job)
    }

    /// Calibration properties; `None` for simulators.
    pub async fn properties(&self) -> IbmqResult<Option<BackendProperties>> {
        if self.configuration.simulator {
            return Ok(None);
        }

        let raw = self.api.backend_properties(self.name()).await?;
        Ok(Some(serde_json::from_value(raw)?))
    }

    /// Live operational status.
    pub async fn status(&self) -> IbmqResult<BackendStatus> {
        let raw = self.api.backend_status(self.name()).await?;
        serde_json::from_value(raw).map_err(|e| IbmqError::Lookup(e.to_string()))
    }

    /// Pulse defaults; `None` if the backend has none.
    pub async fn defaults(&self) -> IbmqResult<Option<PulseDefaults>> {
        let raw = match self.api.backend_defaults(self.name()).await? {
            Some(raw) if !is_empty_document(&raw) => raw,
            _ => return Ok(None),
        };
        Ok(Some(serde_json::from_value(raw)?))
    }

    /// Jobs submitted to this backend, newest first.
    ///
    /// Jobs stored in the pre-Qobj format are left out of the result and
    /// reported in one deprecation warning.
    pub async fn jobs(&self, query: JobQuery) -> IbmqResult<Vec<IbmqJob>> {
        let filter = query.to_filter(self.name())?;
        let records = self
            .api
            .get_status_jobs(query.limit, query.skip, &filter)
            .await?;

        let mut jobs = Vec::with_capacity(records.len());
        let mut legacy_ids = Vec::new();

        for info in &records {
            if !info.is_qobj() {
                legacy_ids.push(info.id.clone().unwrap_or_else(|| "<unknown>".to_string()));
                continue;
            }
            jobs.push(IbmqJob::from_info(self.name(), Arc::clone(&self.api), info));
        }

        if !legacy_ids.is_empty() {
            tracing::warn!(
                target: DEPRECATION_TARGET,
                backend = %self.name(),
                "Some jobs are in a no-longer supported format. \
                 Please send the job using Qobj. Old jobs:\n - {}",
                legacy_ids.join("\n - ")
            );
        }

        Ok(jobs)
    }

    /// Fetch one job of this backend by ID.
    pub async fn retrieve_job(&self, job_id: &str) -> IbmqResult<IbmqJob> {
        let info = self
            .api
            .get_job(job_id)
            .await
            .map_err(|e| IbmqError::job_retrieval(job_id, e))?;

        if let Some(message) = info.error_message() {
            return Err(IbmqError::job_retrieval(job_id, message));
        }

        let job_backend = info.backend_name().unwrap_or("<unknown>");
        if job_backend != self.name() {
            tracing::warn!(
                job_id,
                "Job \"{job_id}\" belongs to another backend than the one queried. \
                 The query was made on backend \"{}\", \
                 but the job actually belongs to backend \"{job_backend}\".",
                self.name()
            );
            return Err(IbmqError::job_retrieval(
                job_id,
                format!("job does not belong to backend \"{}\".", self.name()),
            ));
        }

        if !info.is_qobj() {
            tracing::warn!(
                target: DEPRECATION_TARGET,
                job_id,
                "The result of job {job_id} is in a no longer supported format. \
                 Please send the job using Qobj."
            );
            return Err(IbmqError::job_retrieval(job_id, "job in pre-qobj format"));
        }

        Ok(IbmqJob::from_info(self.name(), Arc::clone(&self.api), &info))
    }
}

/// Whether a payload carries no data (`null`, `{}` or `[]`).
fn is_empty_document(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

impl fmt::Display for IbmqBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let credentials_info = match &self.hub {
            Some(hub) => format!(
                "{hub}, {}, {}",
                self.group.as_deref().unwrap_or_default(),
                self.project.as_deref().unwrap_or_default()
            ),
            None => String::new(),
        };
        write!(
            f,
            "<IbmqBackend('{}') from IBMQ({credentials_info})>",
            self.name()
        )
    }
}

impl fmt::Debug for IbmqBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmqBackend")
            .field("name", &self.name())
            .field("simulator", &self.configuration.simulator)
            .field("hub", &self.hub)
            .field("group", &self.group)
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Backend for IbmqBackend {
    type Job = IbmqJob;

    fn name(&self) -> &str {
        &self.configuration.backend_name
    }

    fn configuration(&self) -> &BackendConfiguration {
        &self.configuration
    }

    async fn submit(&self, qobj: Qobj) -> HalResult<IbmqJob> {
        Ok(self.run(qobj).await?)
    }

    async fn status(&self) -> HalResult<BackendStatus> {
        Ok(IbmqBackend::status(self).await?)
    }

    async fn properties(&self) -> HalResult<Option<BackendProperties>> {
        Ok(IbmqBackend::properties(self).await?)
    }
}
