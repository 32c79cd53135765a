//! Workflow runner for staging REST APIs
//!
//! `runflow` executes an ordered list of REST API calls (a "work template")
//! against a single server. Values returned by earlier calls are captured
//! into a shared variable store and substituted into the addresses and
//! payloads of later calls.
//!
//! # Architecture
//!
//! - **environment**: the variable store and the env-file loader
//! - **template**: work steps and the JSON template loader
//! - **variables**: placeholder substitution and response extraction
//! - **models**: HTTP request and response data
//! - **executor**: sends each step and validates its response
//! - **config**: target server and run options
//! - **cli**: command-line arguments and logger setup
//!
//! # Placeholders
//!
//! A placeholder is written `$*name$`. Before a step is sent, every
//! placeholder whose name is in the store is replaced with the stored value;
//! all other text, including placeholders with no value, is left as is.
//!
//! # Example
//!
//! ```no_run
//! use runflow::config::RunnerConfig;
//! use runflow::environment::load_env_file;
//! use runflow::executor::StepExecutor;
//! use runflow::template::load_template;
//! use std::path::Path;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = load_env_file(Path::new("staging.env"))?;
//! let template = load_template(Path::new("post-staging.json"))?;
//!
//! let config = RunnerConfig::new("10.40.1.10", 9182);
//! let mut executor = StepExecutor::new(config, store)?;
//! let report = executor.run(&template).await;
//!
//! println!("{} of {} steps passed", report.passed(), report.total_steps);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod executor;
pub mod models;
pub mod template;
pub mod variables;
