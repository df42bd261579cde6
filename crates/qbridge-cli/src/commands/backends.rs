//! Backends command implementation.

use anyhow::Result;
use console::style;

use super::common::{connect, indicator, spinner};

/// Execute the backends command.
pub async fn execute() -> Result<()> {
    let provider = connect()?;

    let spinner = spinner("Fetching backends...")?;
    let backends = provider.backends().await;
    spinner.finish_and_clear();
    let backends = backends?;

    println!(
        "{} {} backend(s) available:\n",
        style("IBM Q").cyan().bold(),
        backends.len()
    );

    for backend in &backends {
        let config = backend.configuration();
        let operational = backend.status().await.is_ok_and(|s| s.operational);

        println!(
            "  {} {} {}",
            indicator(operational),
            style(backend.name()).bold(),
            if config.simulator { "(simulator)" } else { "" }
        );
        println!("    Qubits: {}", config.n_qubits);
        if let Some(max_shots) = config.max_shots {
            println!("    Max shots: {max_shots}");
        }
        if !config.basis_gates.is_empty() {
            println!("    Gates: {}", config.basis_gates.join(", "));
        }
        if !operational {
            println!("    Status: offline or maintenance");
        }
        println!();
    }

    Ok(())
}
