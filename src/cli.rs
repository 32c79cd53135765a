//! Command-line interface.
//!
//! ```text
//! runflow -e staging.env -t post-staging.json -s 10.40.1.10 -p 9182
//! ```

use crate::config::RunnerConfig;
use clap::Parser;
use std::path::PathBuf;

/// Runs a work template of REST API calls against one server
#[derive(Debug, Clone, Parser)]
#[command(name = "runflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Environment file with one `key: value` pair per line
    #[arg(short = 'e', long = "env", value_name = "FILE")]
    pub env_file: PathBuf,

    /// JSON work template to execute
    #[arg(short = 't', long = "template", value_name = "FILE")]
    pub template_file: PathBuf,

    /// Server host name or IP address
    #[arg(short = 's', long = "server", value_name = "HOST")]
    pub server: String,

    /// Server port
    #[arg(short = 'p', long = "port")]
    pub port: u16,

    /// Stop at the first failed step
    #[arg(long)]
    pub fail_fast: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log debug output, including the environment dump
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Run configuration described by the arguments.
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig::new(self.server.trim(), self.port)
            .with_fail_fast(self.fail_fast)
            .with_timeout_secs(self.timeout)
    }

    /// Default log filter for these arguments, used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info,runflow=debug"
        } else {
            "info"
        }
    }
}

/// Installs the `env_logger` backend.
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_logger(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // A second call (tests, embedding) leaves the first logger in place
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
