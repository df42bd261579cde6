//! qbridge command-line interface.
//!
//! Argument definitions and command implementations; the `qbridge` binary
//! only parses arguments, sets up logging and dispatches.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
