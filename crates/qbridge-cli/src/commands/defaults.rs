//! Defaults command implementation.

use anyhow::Result;
use console::style;

use super::common::backend;

/// Execute the defaults command.
pub async fn execute(name: &str) -> Result<()> {
    let backend = backend(name).await?;

    let Some(defaults) = backend.defaults().await? else {
        println!(
            "{} {} has no pulse defaults.",
            style("→").cyan().bold(),
            style(backend.name()).bold()
        );
        return Ok(());
    };

    println!(
        "{} Pulse defaults for {}",
        style("→").cyan().bold(),
        style(backend.name()).bold()
    );
    println!("  Qubit frequencies (GHz): {}", join(&defaults.qubit_freq_est));
    println!("  Measurement frequencies (GHz): {}", join(&defaults.meas_freq_est));
    println!("  Buffer: {} samples", defaults.buffer);
    println!("  Pulse library: {} pulse(s)", defaults.pulse_library.len());
    println!("  Command definitions: {}", defaults.cmd_def.len());

    for cmd in &defaults.cmd_def {
        let qubits: Vec<_> = cmd.qubits.iter().map(u32::to_string).collect();
        println!("    {}({})", style(&cmd.name).cyan(), qubits.join(", "));
    }

    Ok(())
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.4}"))
        .collect::<Vec<_>>()
        .join(", ")
}
