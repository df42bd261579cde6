//! IBM Q Experience adapter for qbridge.
//!
//! Talks to the IBM Q Experience job service: backend status, calibration
//! properties and pulse defaults, job submission, and querying previously
//! submitted jobs.
//!
//! # Example
//!
//! ```ignore
//! use qbridge_adapter_ibmq::{IbmqProvider, JobQuery};
//! use qbridge_hal::JobStatus;
//!
//! let provider = IbmqProvider::from_env()?;
//! let backend = provider.get_backend("ibmqx4").await?;
//!
//! println!("{} pending", backend.status().await?.pending_jobs);
//!
//! // Last five failed jobs.
//! let failed = backend
//!     .jobs(JobQuery::new().limit(5).status(JobStatus::Error))
//!     .await?;
//! ```
//!
//! # Testing against a fake service
//!
//! Backend handles only see an `Arc<dyn IbmqApi>`, so tests can inject an
//! in-memory implementation of [`IbmqApi`] instead of [`IbmqConnector`].

pub mod api;
pub mod backend;
pub mod credentials;
pub mod error;
pub mod filter;
pub mod job;
pub mod provider;

pub use api::{IbmqApi, IbmqConnector, JobInfo, QOBJ_KIND};
pub use backend::{DEPRECATION_TARGET, IbmqBackend};
pub use credentials::Credentials;
pub use error::{IbmqError, IbmqResult};
pub use filter::{JobFilter, JobQuery, StatusSelector};
pub use job::IbmqJob;
pub use provider::IbmqProvider;
