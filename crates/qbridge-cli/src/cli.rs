//! Command-line arguments.

use clap::{Parser, Subcommand};

use qbridge_adapter_ibmq::filter::DEFAULT_LIMIT;

/// qbridge - inspect IBM Q backends and their jobs
#[derive(Debug, Parser)]
#[command(name = "qbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter directive for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the backends available to the account
    Backends,

    /// Show the live status of a backend
    Status {
        /// Backend name
        backend: String,
    },

    /// Show calibration properties of a backend
    Properties {
        /// Backend name
        backend: String,
    },

    /// Show pulse defaults of a backend
    Defaults {
        /// Backend name
        backend: String,
    },

    /// List jobs submitted to a backend, newest first
    Jobs {
        /// Backend name
        backend: String,

        /// Maximum number of jobs
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Number of jobs to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Only jobs in this status (QUEUED, RUNNING, CANCELLED, DONE, ERROR)
        #[arg(short, long)]
        status: Option<String>,

        /// Extra `where` predicates as a JSON object
        #[arg(long)]
        filter: Option<String>,
    },

    /// Submit a Qobj JSON file to a backend
    Submit {
        /// Backend name
        backend: String,

        /// Path to the Qobj JSON file
        qobj: String,

        /// Override the number of shots
        #[arg(long)]
        shots: Option<u32>,
    },

    /// Retrieve a single job of a backend
    Retrieve {
        /// Backend name
        backend: String,

        /// Job ID
        job_id: String,
    },
}
