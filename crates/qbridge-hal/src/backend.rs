//! Backend capability trait.
//!
//! A backend is anything that can describe itself, accept a [`Qobj`], and
//! report its live status and calibration data:
//!
//! ```text
//!   configuration() ──→ status() ──→ properties() ──→ submit()
//!    (sync, &ref)        (async)       (async)         (async)
//! ```
//!
//! | Method | Kind | Returns |
//! |--------|------|---------|
//! | `name()` | sync | `&str` |
//! | `configuration()` | sync | `&BackendConfiguration` |
//! | `submit()` | async | `HalResult<Self::Job>` |
//! | `status()` | async | `HalResult<BackendStatus>` |
//! | `properties()` | async | `HalResult<Option<BackendProperties>>` |
//!
//! Remote services are one implementation; a local simulator would be
//! another, with its own `Job` type.

use async_trait::async_trait;

use crate::error::HalResult;
use crate::models::{BackendConfiguration, BackendProperties, BackendStatus, Qobj};

/// Trait for quantum backends.
///
/// # Contract
///
/// - `configuration()` MUST be synchronous and infallible; it is fixed at
///   construction.
/// - `properties()` returns `None` for backends without calibration data
///   (simulators) and MUST NOT perform I/O in that case.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Handle returned for a submitted job.
    type Job: Send;

    /// Get the name of this backend.
    fn name(&self) -> &str {
        &self.configuration().backend_name
    }

    /// Get the static configuration of this backend.
    fn configuration(&self) -> &BackendConfiguration;

    /// Submit a Qobj for execution.
    async fn submit(&self, qobj: Qobj) -> HalResult<Self::Job>;

    /// Get the live status of this backend.
    async fn status(&self) -> HalResult<BackendStatus>;

    /// Get calibration properties, if the backend has any.
    async fn properties(&self) -> HalResult<Option<BackendProperties>>;
}
