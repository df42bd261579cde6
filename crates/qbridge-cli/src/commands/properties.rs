//! Properties command implementation.
//!
//! Print per-qubit and per-gate calibration data.

use anyhow::Result;
use console::style;

use qbridge_hal::Nduv;

use super::common::backend;

/// Execute the properties command.
pub async fn execute(name: &str) -> Result<()> {
    let backend = backend(name).await?;

    let Some(properties) = backend.properties().await? else {
        println!(
            "{} {} is a simulator and has no calibration properties.",
            style("→").cyan().bold(),
            style(backend.name()).bold()
        );
        return Ok(());
    };

    println!(
        "{} {} calibrated {}",
        style("→").cyan().bold(),
        style(&properties.backend_name).bold(),
        properties.last_update_date.format("%Y-%m-%d %H:%M UTC")
    );

    println!("\n  {}", style("Qubits").bold());
    for (index, qubit) in properties.qubits.iter().enumerate() {
        println!("    Q{index}: {}", format_values(qubit));
    }

    if !properties.gates.is_empty() {
        println!("\n  {}", style("Gates").bold());
        for gate in &properties.gates {
            let qubits: Vec<_> = gate.qubits.iter().map(u32::to_string).collect();
            println!(
                "    {}({}): {}",
                style(&gate.gate).cyan(),
                qubits.join(", "),
                format_values(&gate.parameters)
            );
        }
    }

    if !properties.general.is_empty() {
        println!("\n  {}", style("General").bold());
        println!("    {}", format_values(&properties.general));
    }

    Ok(())
}

fn format_values(values: &[Nduv]) -> String {
    values
        .iter()
        .map(|v| {
            if v.unit.is_empty() {
                format!("{}={}", v.name, v.value)
            } else {
                format!("{}={} {}", v.name, v.value, v.unit)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
