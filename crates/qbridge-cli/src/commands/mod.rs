//! CLI command implementations.

pub mod backends;
pub mod common;
pub mod defaults;
pub mod jobs;
pub mod properties;
pub mod retrieve;
pub mod status;
pub mod submit;
