//! IBM Q Experience API client.
//!
//! [`IbmqApi`] is the seam between backend handles and the remote service:
//! handles only ever talk to an `Arc<dyn IbmqApi>` injected at
//! construction. [`IbmqConnector`] is the HTTP implementation over the
//! QX REST layout:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list backends | `GET {scope}/Backends/v/1` |
//! | properties | `GET /Backends/{name}/properties` |
//! | status | `GET /Backends/{name}/queue/status` |
//! | pulse defaults | `GET /Backends/{name}/defaults` |
//! | list jobs | `GET {scope}/Jobs/status?filter=...` |
//! | get job | `GET {scope}/Jobs/{id}` |
//! | submit | `POST {scope}/Jobs` |
//! | cancel | `POST {scope}/Jobs/{id}/cancel` |
//!
//! `{scope}` is `/Network/{hub}/Groups/{group}/Projects/{project}` for
//! accounts with a hub, and empty otherwise. Backend names and job IDs are
//! percent-encoded as single path segments.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode, Url, header};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use qbridge_hal::{BackendConfiguration, Qobj};

use crate::credentials::Credentials;
use crate::error::{IbmqError, IbmqResult};
use crate::filter::JobFilter;

/// `kind` marker of jobs in the current (Qobj) format.
pub const QOBJ_KIND: &str = "q-object";

/// Header carrying the API token.
const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// User-Agent sent with requests.
const USER_AGENT: &str = concat!("qbridge/", env!("CARGO_PKG_VERSION"));

/// Operations a backend handle needs from the remote service.
#[async_trait]
pub trait IbmqApi: Send + Sync {
    /// Configurations of every backend visible to the account.
    async fn available_backends(&self) -> IbmqResult<Vec<BackendConfiguration>>;

    /// Raw calibration properties of a backend.
    async fn backend_properties(&self, backend: &str) -> IbmqResult<Value>;

    /// Raw live status of a backend.
    async fn backend_status(&self, backend: &str) -> IbmqResult<Value>;

    /// Raw pulse defaults of a backend, `None` if it has none.
    async fn backend_defaults(&self, backend: &str) -> IbmqResult<Option<Value>>;

    /// Job records matching `filter`, newest first.
    async fn get_status_jobs(
        &self,
        limit: usize,
        skip: usize,
        filter: &JobFilter,
    ) -> IbmqResult<Vec<JobInfo>>;

    /// A single job record.
    async fn get_job(&self, job_id: &str) -> IbmqResult<JobInfo>;

    /// Submit a Qobj to a backend.
    async fn submit_job(&self, backend: &str, qobj: &Qobj) -> IbmqResult<JobInfo>;

    /// Cancel a job.
    async fn cancel_job(&self, job_id: &str) -> IbmqResult<()>;
}

/// A job record as returned by the job endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    /// Job ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    /// Raw remote status (e.g. `RUNNING`, `COMPLETED`, `ERROR_RUNNING_JOB`).
    #[serde(default)]
    pub status: Option<String>,
    /// Format marker; [`QOBJ_KIND`] for current jobs.
    #[serde(default)]
    pub kind: Option<String>,
    /// Backend the job belongs to.
    #[serde(default)]
    pub backend: Option<JobBackend>,
    /// Error reported instead of (or alongside) the job.
    #[serde(default)]
    pub error: Option<Value>,
    /// Queue information while the job waits.
    #[serde(default)]
    pub info_queue: Option<QueueInfo>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Backend reference inside a job record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobBackend {
    /// Backend name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Queue information inside a job record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueInfo {
    /// Queue status (e.g. `PENDING_IN_QUEUE`).
    #[serde(default)]
    pub status: Option<String>,
    /// Position in the queue.
    #[serde(default)]
    pub position: Option<u32>,
}

impl JobInfo {
    /// Whether the job is in the current Qobj format.
    pub fn is_qobj(&self) -> bool {
        self.kind.as_deref() == Some(QOBJ_KIND)
    }

    /// Name of the backend the job belongs to.
    pub fn backend_name(&self) -> Option<&str> {
        self.backend.as_ref()?.name.as_deref()
    }

    /// Queue status, if the job is queued.
    pub fn queue_status(&self) -> Option<&str> {
        self.info_queue.as_ref()?.status.as_deref()
    }

    /// Human-readable error, if the record carries one.
    ///
    /// Errors come either as a plain string or as an object with a
    /// `message` field.
    pub fn error_message(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        Some(match error {
            Value::String(message) => message.clone(),
            Value::Object(map) => match map.get("message").and_then(Value::as_str) {
                Some(message) => message.to_string(),
                None => error.to_string(),
            },
            other => other.to_string(),
        })
    }
}

/// Hub/group/project scope of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Instance {
    hub: String,
    group: String,
    project: String,
}

/// HTTP client for the IBM Q Experience API.
pub struct IbmqConnector {
    /// HTTP client.
    client: Client,
    /// API base URL, without trailing slash.
    base_url: Url,
    /// Hub/group/project scope.
    instance: Option<Instance>,
}

impl fmt::Debug for IbmqConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmqConnector")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("instance", &self.instance)
            .finish()
    }
}

impl IbmqConnector {
    /// Create a connector from account credentials.
    pub fn new(credentials: &Credentials) -> IbmqResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::HeaderName::from_static(ACCESS_TOKEN_HEADER),
            header::HeaderValue::from_str(&credentials.token)
                .map_err(|_| IbmqError::InvalidToken)?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let instance = match (&credentials.hub, &credentials.group, &credentials.project) {
            (Some(hub), Some(group), Some(project)) => Some(Instance {
                hub: hub.clone(),
                group: group.clone(),
                project: project.clone(),
            }),
            _ => None,
        };

        let raw_url = credentials.url.trim_end_matches('/');
        let base_url = Url::parse(raw_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| IbmqError::InvalidParameter(format!("invalid API URL: {raw_url}")))?;

        Ok(Self {
            client,
            base_url,
            instance,
        })
    }

    /// API base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended by `segments`, each encoded as one path segment.
    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// URL of an account-scoped resource.
    fn scoped_url(&self, segments: &[&str]) -> Url {
        match &self.instance {
            Some(Instance {
                hub,
                group,
                project,
            }) => {
                let mut scoped = vec![
                    "Network",
                    hub.as_str(),
                    "Groups",
                    group.as_str(),
                    "Projects",
                    project.as_str(),
                ];
                scoped.extend_from_slice(segments);
                self.url_with(&scoped)
            }
            None => self.url_with(segments),
        }
    }

    /// URL of a backend resource.
    fn backend_url(&self, backend: &str, resource: &[&str]) -> Url {
        let mut segments = vec!["Backends", backend];
        segments.extend_from_slice(resource);
        self.url_with(&segments)
    }

    /// Serialized `filter` query parameter of a job listing.
    fn jobs_query(limit: usize, skip: usize, filter: &JobFilter) -> IbmqResult<String> {
        let query = json!({
            "where": filter,
            "order": "creationDate DESC",
            "limit": limit,
            "skip": skip,
        });
        Ok(serde_json::to_string(&query)?)
    }

    /// Turn a non-success response into an API error.
    async fn check(response: Response) -> IbmqResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "no body".to_string());

        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(ApiErrorResponse { error }) => Err(IbmqError::ApiError {
                code: error.code,
                message: error.message.unwrap_or_else(|| format!("HTTP {status}")),
            }),
            Err(_) => Err(IbmqError::ApiError {
                code: None,
                message: format!("HTTP {status}: {body}"),
            }),
        }
    }

    async fn get_json(&self, url: Url) -> IbmqResult<Value> {
        tracing::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let response = Self::check(response).await?;
        response.json().await.map_err(IbmqError::from)
    }
}

#[async_trait]
impl IbmqApi for IbmqConnector {
    async fn available_backends(&self) -> IbmqResult<Vec<BackendConfiguration>> {
        let value = self.get_json(self.scoped_url(&["Backends", "v", "1"])).await?;
        let backends = match value {
            Value::Array(_) => serde_json::from_value(value)?,
            other => serde_json::from_value::<BackendsResponse>(other)?.backends,
        };
        Ok(backends)
    }

    async fn backend_properties(&self, backend: &str) -> IbmqResult<Value> {
        self.get_json(self.backend_url(backend, &["properties"])).await
    }

    async fn backend_status(&self, backend: &str) -> IbmqResult<Value> {
        let raw = self
            .get_json(self.backend_url(backend, &["queue", "status"]))
            .await?;
        Ok(normalize_status(backend, raw))
    }

    async fn backend_defaults(&self, backend: &str) -> IbmqResult<Option<Value>> {
        let url = self.backend_url(backend, &["defaults"]);
        tracing::debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let value: Value = Self::check(response).await?.json().await?;
        Ok(Some(value))
    }

    async fn get_status_jobs(
        &self,
        limit: usize,
        skip: usize,
        filter: &JobFilter,
    ) -> IbmqResult<Vec<JobInfo>> {
        let url = self.scoped_url(&["Jobs", "status"]);
        let query = Self::jobs_query(limit, skip, filter)?;
        tracing::debug!("GET {url} filter={query}");

        let response = self
            .client
            .get(url)
            .query(&[("filter", query)])
            .send()
            .await?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(IbmqError::from)
    }

    async fn get_job(&self, job_id: &str) -> IbmqResult<JobInfo> {
        let url = self.scoped_url(&["Jobs", job_id]);
        tracing::debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(IbmqError::JobNotFound(job_id.to_string()));
        }

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(IbmqError::from)
    }

    async fn submit_job(&self, backend: &str, qobj: &Qobj) -> IbmqResult<JobInfo> {
        let url = self.scoped_url(&["Jobs"]);
        let mut body = json!({
            "qObject": qobj,
            "backend": {"name": backend},
        });
        if let Some(shots) = qobj.shots() {
            body["shots"] = json!(shots);
        }

        tracing::debug!("POST {url} backend={backend} qobj_id={}", qobj.qobj_id);
        let response = self.client.post(url).json(&body).send().await?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(IbmqError::from)
    }

    async fn cancel_job(&self, job_id: &str) -> IbmqResult<()> {
        let url = self.scoped_url(&["Jobs", job_id, "cancel"]);
        tracing::debug!("POST {url}");
        let response = self.client.post(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(IbmqError::JobNotFound(job_id.to_string()));
        }

        Self::check(response).await?;
        Ok(())
    }
}

/// Reshape a queue-status document into the backend status schema.
///
/// The queue endpoint reports `state`, `status` and `lengthQueue`;
/// documents that already carry `operational` are passed through.
fn normalize_status(backend: &str, raw: Value) -> Value {
    let Value::Object(fields) = &raw else {
        return raw;
    };
    if fields.contains_key("operational") {
        return raw;
    }

    let pending_jobs = fields
        .get("lengthQueue")
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .max(0);

    json!({
        "backend_name": backend,
        "backend_version": fields.get("backend_version").cloned().unwrap_or_else(|| json!("0.0.0")),
        "operational": fields.get("state").and_then(Value::as_bool).unwrap_or(false),
        "pending_jobs": pending_jobs,
        "status_msg": fields.get("status").cloned().unwrap_or_else(|| json!("")),
    })
}

// ============================================================================
// Response types
// ============================================================================

/// API error envelope (`{"error": {...}}`).
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

/// API error details.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Wrapped backend listing (`{"backends": [...]}`).
#[derive(Debug, Deserialize)]
struct BackendsResponse {
    backends: Vec<BackendConfiguration>,
}
