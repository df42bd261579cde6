//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use console::{StyledObject, style};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};

use qbridge_adapter_ibmq::{IbmqBackend, IbmqProvider};
use qbridge_hal::{JobStatus, Qobj};

/// Connect to IBM Q using the `QE_*` environment variables.
pub fn connect() -> Result<IbmqProvider> {
    IbmqProvider::from_env().context("Failed to configure IBM Q access")
}

/// Look up one backend, with a spinner while the backend list loads.
pub async fn backend(name: &str) -> Result<Arc<IbmqBackend>> {
    let provider = connect()?;

    let spinner = spinner(format!("Looking up backend {name}..."))?;
    let backend = provider.get_backend(name).await;
    spinner.finish_and_clear();

    Ok(backend?)
}

/// Steady-ticking spinner with a message.
pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Read a Qobj from a JSON file.
pub fn load_qobj(path: &str) -> Result<Qobj> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    serde_json::from_str(&source).with_context(|| format!("{path} is not a valid Qobj"))
}

/// Parse a `--filter` argument into raw `where` predicates.
pub fn parse_db_filter(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).context("--filter is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("--filter must be a JSON object, got: {other}"),
    }
}

/// Colored status name; `UNKNOWN` when the remote status is not recognized.
pub fn styled_status(status: Option<JobStatus>) -> StyledObject<&'static str> {
    match status {
        Some(JobStatus::Done) => style("DONE").green(),
        Some(status @ (JobStatus::Error | JobStatus::Cancelled)) => style(status.name()).red(),
        Some(JobStatus::Queued) => style("QUEUED").yellow(),
        Some(JobStatus::Running) => style("RUNNING").cyan(),
        None => style("UNKNOWN").dim(),
    }
}

/// Green or red dot for an up/down flag.
pub fn indicator(up: bool) -> StyledObject<&'static str> {
    if up { style("●").green() } else { style("○").red() }
}
