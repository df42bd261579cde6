//! Retrieve command implementation.

use anyhow::Result;
use console::style;

use super::common::{backend, styled_status};

/// Execute the retrieve command.
pub async fn execute(name: &str, job_id: &str) -> Result<()> {
    let backend = backend(name).await?;
    let job = backend.retrieve_job(job_id).await?;

    println!(
        "{} Job {} on {}: {}",
        style("→").cyan().bold(),
        style(job_id).dim(),
        style(job.backend_name()).bold(),
        styled_status(job.status())
    );

    if let Some(api_status) = job.api_status() {
        println!("  Remote status: {}", style(api_status).yellow());
    }
    if let Some(created) = job.creation_date() {
        println!("  Created: {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if job.status().is_some_and(|s| s.is_terminal()) {
        println!("  Terminal: {}", style("yes").dim());
    }

    Ok(())
}
