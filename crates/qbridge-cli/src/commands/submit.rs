//! Submit command implementation.

use anyhow::Result;
use console::style;

use super::common::{backend, load_qobj, spinner, styled_status};

/// Execute the submit command.
pub async fn execute(name: &str, input: &str, shots: Option<u32>) -> Result<()> {
    let mut qobj = load_qobj(input)?;
    if let Some(shots) = shots {
        qobj = qobj.with_shots(shots);
    }

    println!(
        "{} Submitting {} to {} ({} experiments{})",
        style("→").cyan().bold(),
        style(input).green(),
        style(name).yellow(),
        qobj.experiments.len(),
        qobj.shots().map(|s| format!(", {s} shots")).unwrap_or_default()
    );

    let backend = backend(name).await?;

    let spinner = spinner("Submitting job...")?;
    let job = backend.run(qobj).await;
    spinner.finish_and_clear();
    let job = job?;

    let id = job.id().map(ToString::to_string).unwrap_or_default();
    println!(
        "{} Job {} submitted: {}",
        style("✓").green().bold(),
        style(id).bold(),
        styled_status(job.status())
    );

    Ok(())
}
