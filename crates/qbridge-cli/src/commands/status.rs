//! Status command implementation.

use anyhow::Result;
use console::style;

use super::common::{backend, indicator};

/// Execute the status command.
pub async fn execute(name: &str) -> Result<()> {
    let backend = backend(name).await?;
    let status = backend.status().await?;

    println!(
        "{} {} {} (version {})",
        style("→").cyan().bold(),
        indicator(status.operational),
        style(&status.backend_name).bold(),
        status.backend_version
    );
    println!(
        "  Operational: {}",
        if status.operational {
            style("yes").green()
        } else {
            style("no").red()
        }
    );
    println!("  Pending jobs: {}", style(status.pending_jobs).yellow());
    println!("  Message: {}", status.status_msg);

    Ok(())
}
