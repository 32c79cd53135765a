//! Run configuration.
//!
//! The configuration is built once from the command line, validated, and
//! handed to the step executor. There is no process-wide instance.

pub mod schema;

pub use schema::{ConfigError, RunnerConfig};
