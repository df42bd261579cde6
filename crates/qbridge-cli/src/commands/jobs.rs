//! Jobs command implementation.
//!
//! List jobs submitted to a backend.

use anyhow::Result;
use console::style;

use qbridge_adapter_ibmq::JobQuery;

use super::common::{backend, parse_db_filter, styled_status};

/// Build the listing query from command-line arguments.
pub fn build_query(
    limit: usize,
    skip: usize,
    status: Option<&str>,
    filter: Option<&str>,
) -> Result<JobQuery> {
    let mut query = JobQuery::new().limit(limit).skip(skip);
    if let Some(status) = status {
        query = query.status(status);
    }
    if let Some(filter) = filter {
        query = query.db_filter(parse_db_filter(filter)?);
    }
    Ok(query)
}

/// Execute the jobs command.
pub async fn execute(
    name: &str,
    limit: usize,
    skip: usize,
    status: Option<&str>,
    filter: Option<&str>,
) -> Result<()> {
    let query = build_query(limit, skip, status, filter)?;
    let backend = backend(name).await?;
    let jobs = backend.jobs(query).await?;

    if jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    println!("{} {} job(s):\n", style("→").cyan().bold(), jobs.len());

    println!(
        "  {:<26}  {:<10}  {}",
        style("JOB ID").bold(),
        style("STATUS").bold(),
        style("CREATED").bold()
    );
    println!("  {}", "-".repeat(60));

    for job in &jobs {
        let created = job
            .creation_date()
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        println!(
            "  {:<26}  {:<10}  {}",
            style(job.id().map(|id| id.as_str()).unwrap_or("-")).dim(),
            styled_status(job.status()),
            created,
        );
    }

    Ok(())
}
