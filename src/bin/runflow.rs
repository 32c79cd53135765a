//! `runflow` binary entry point
//!
//! Loads the environment file and the work template, then executes every
//! step against the server named on the command line. Step failures are
//! logged and counted but do not change the exit code; only unusable
//! arguments or input files exit with status 1.

use anyhow::Context;
use clap::Parser;
use runflow::cli::{init_logger, Cli};
use runflow::environment::{load_env_file, log_store};
use runflow::executor::StepExecutor;
use runflow::template::load_template;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too, with exit code 0
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logger(cli.log_filter());

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.runner_config();
    config.validate().context("invalid server settings")?;

    let store = load_env_file(&cli.env_file)
        .with_context(|| format!("cannot load environment {}", cli.env_file.display()))?;
    log::info!(
        "loaded {} variable(s) from {}",
        store.len(),
        cli.env_file.display()
    );
    log_store(&store);

    let template = load_template(&cli.template_file)
        .with_context(|| format!("cannot load template {}", cli.template_file.display()))?;

    log::info!(
        "running {} step(s) against {}",
        template.len(),
        config.base_url()
    );

    let mut executor = StepExecutor::new(config, store).context("cannot build HTTP client")?;
    let report = executor.run(&template).await;

    for outcome in report.failures() {
        if let Some(err) = outcome.error() {
            log::warn!("step {} ({}) failed: {}", outcome.index + 1, outcome.name, err);
        }
    }

    if report.halted {
        log::warn!(
            "run halted after step {} of {}",
            report.executed(),
            report.total_steps
        );
    }

    log::info!(
        "completed: {} passed, {} failed, {} of {} step(s) executed",
        report.passed(),
        report.failed(),
        report.executed(),
        report.total_steps
    );

    Ok(())
}
