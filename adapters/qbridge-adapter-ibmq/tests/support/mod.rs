//! Shared fixtures: an in-memory IBM Q service and a log capture.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use qbridge_adapter_ibmq::{
    Credentials, IbmqApi, IbmqBackend, IbmqError, IbmqResult, JobFilter, JobInfo,
};
use qbridge_hal::{BackendConfiguration, Qobj};

/// A request received by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AvailableBackends,
    Properties(String),
    Status(String),
    Defaults(String),
    StatusJobs {
        limit: usize,
        skip: usize,
        filter: JobFilter,
    },
    GetJob(String),
    Submit(String),
    Cancel(String),
}

/// What `get_job` answers with.
#[derive(Debug, Clone)]
pub enum JobReply {
    Record(Value),
    TransportError(String),
}

/// In-memory stand-in for the remote service.
#[derive(Default)]
pub struct FakeApi {
    pub backends: Vec<Value>,
    pub properties: Option<Value>,
    pub status: Option<Value>,
    pub defaults: Option<Value>,
    pub jobs: Vec<Value>,
    pub job: Option<JobReply>,
    /// Answers for successive `get_job` calls, used before `job`.
    pub job_replies: Mutex<VecDeque<JobReply>>,
    pub submit_reply: Option<Value>,
    pub requests: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.requests.lock().unwrap().clone()
    }

    /// Queue the answer for the next `get_job` call.
    pub fn push_job_reply(&self, reply: JobReply) {
        self.job_replies.lock().unwrap().push_back(reply);
    }

    fn record(&self, call: Call) {
        self.requests.lock().unwrap().push(call);
    }

    fn unconfigured(what: &str) -> IbmqError {
        IbmqError::ApiError {
            code: None,
            message: format!("{what} not configured"),
        }
    }
}

#[async_trait]
impl IbmqApi for FakeApi {
    async fn available_backends(&self) -> IbmqResult<Vec<BackendConfiguration>> {
        self.record(Call::AvailableBackends);
        self.backends
            .iter()
            .map(|b| serde_json::from_value(b.clone()).map_err(IbmqError::from))
            .collect()
    }

    async fn backend_properties(&self, backend: &str) -> IbmqResult<Value> {
        self.record(Call::Properties(backend.to_string()));
        self.properties
            .clone()
            .ok_or_else(|| Self::unconfigured("properties"))
    }

    async fn backend_status(&self, backend: &str) -> IbmqResult<Value> {
        self.record(Call::Status(backend.to_string()));
        self.status.clone().ok_or_else(|| Self::unconfigured("status"))
    }

    async fn backend_defaults(&self, backend: &str) -> IbmqResult<Option<Value>> {
        self.record(Call::Defaults(backend.to_string()));
        Ok(self.defaults.clone())
    }

    async fn get_status_jobs(
        &self,
        limit: usize,
        skip: usize,
        filter: &JobFilter,
    ) -> IbmqResult<Vec<JobInfo>> {
        self.record(Call::StatusJobs {
            limit,
            skip,
            filter: filter.clone(),
        });
        self.jobs
            .iter()
            .map(|j| serde_json::from_value(j.clone()).map_err(IbmqError::from))
            .collect()
    }

    async fn get_job(&self, job_id: &str) -> IbmqResult<JobInfo> {
        self.record(Call::GetJob(job_id.to_string()));
        let queued = self.job_replies.lock().unwrap().pop_front();
        match queued.as_ref().or(self.job.as_ref()) {
            Some(JobReply::Record(value)) => Ok(serde_json::from_value(value.clone())?),
            Some(JobReply::TransportError(message)) => Err(IbmqError::ApiError {
                code: None,
                message: message.clone(),
            }),
            None => Err(Self::unconfigured("job")),
        }
    }

    async fn submit_job(&self, backend: &str, _qobj: &Qobj) -> IbmqResult<JobInfo> {
        self.record(Call::Submit(backend.to_string()));
        let reply = self
            .submit_reply
            .clone()
            .ok_or_else(|| Self::unconfigured("submit"))?;
        Ok(serde_json::from_value(reply)?)
    }

    async fn cancel_job(&self, job_id: &str) -> IbmqResult<()> {
        self.record(Call::Cancel(job_id.to_string()));
        Ok(())
    }
}

/// A current-format job record.
pub fn qobj_job(id: &str, backend: &str, status: &str) -> Value {
    json!({
        "id": id,
        "kind": "q-object",
        "status": status,
        "creationDate": "2019-03-26T12:00:00.000Z",
        "backend": {"name": backend}
    })
}

/// A pre-Qobj job record.
pub fn legacy_job(id: &str, backend: &str) -> Value {
    json!({
        "id": id,
        "status": "COMPLETED",
        "creationDate": "2018-06-01T08:00:00.000Z",
        "backend": {"name": backend},
        "qasms": []
    })
}

/// Public-account credentials.
pub fn credentials() -> Credentials {
    Credentials::new("token", "https://example.com/api")
}

/// Device handle called `ibmqx4` over `api`.
pub fn device(api: Arc<FakeApi>) -> IbmqBackend {
    IbmqBackend::new(BackendConfiguration::new("ibmqx4", 5), &credentials(), api)
}

/// Simulator handle called `ibmq_qasm_simulator` over `api`.
pub fn simulator(api: Arc<FakeApi>) -> IbmqBackend {
    IbmqBackend::new(
        BackendConfiguration::new("ibmq_qasm_simulator", 32).with_simulator(true),
        &credentials(),
        api,
    )
}

/// Collects formatted `tracing` output for assertions.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install a capturing subscriber for the current thread.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = LogCapture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines logged at WARN level.
    pub fn warnings(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(" WARN "))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
