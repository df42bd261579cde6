//! qbridge Hardware Abstraction Layer
//!
//! Provider-neutral types shared by every qbridge backend adapter.
//!
//! # Overview
//!
//! - A [`Backend`] capability trait for submission, status and calibration
//!   queries
//! - Typed payload [`models`] (configuration, properties, status, pulse
//!   defaults, Qobj)
//! - The [`JobStatus`] set callers filter and report on
//! - A common [`HalError`] that adapter errors convert into
//!
//! # Example
//!
//! ```ignore
//! use qbridge_hal::{Backend, Qobj};
//!
//! async fn report<B: Backend>(backend: &B) -> qbridge_hal::HalResult<()> {
//!     let status = backend.status().await?;
//!     println!("{}: {} pending", backend.name(), status.pending_jobs);
//!
//!     if let Some(props) = backend.properties().await? {
//!         println!("calibrated at {}", props.last_update_date);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod job;
pub mod models;

pub use backend::Backend;
pub use error::{HalError, HalResult};
pub use job::{JobId, JobStatus, ParseJobStatusError};
pub use models::{
    BackendConfiguration, BackendProperties, BackendStatus, CommandDefinition, GateProperties,
    Nduv, PulseDefaults, PulseLibraryItem, Qobj, QobjType,
};
