//! qbridge command-line interface.
//!
//! The main entry point for the `qbridge` tool.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use qbridge_cli::commands::{backends, defaults, jobs, properties, retrieve, status, submit};
use qbridge_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_filter()))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Backends => backends::execute().await,

        Commands::Status { backend } => status::execute(&backend).await,

        Commands::Properties { backend } => properties::execute(&backend).await,

        Commands::Defaults { backend } => defaults::execute(&backend).await,

        Commands::Jobs {
            backend,
            limit,
            skip,
            status,
            filter,
        } => jobs::execute(&backend, limit, skip, status.as_deref(), filter.as_deref()).await,

        Commands::Submit {
            backend,
            qobj,
            shots,
        } => submit::execute(&backend, &qobj, shots).await,

        Commands::Retrieve { backend, job_id } => retrieve::execute(&backend, &job_id).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
