//! `tracelink`'s three subcommands (spec §6): `baseline-create`,
//! `baseline-update`, and `pr-analyze`. [`run`] parses arguments, builds
//! [`config::Settings`] from the environment, dispatches, and maps the
//! result to a process exit code.

pub mod args;
pub mod baseline_create;
pub mod baseline_update;
pub mod config;
pub mod error;
pub mod github;
pub mod gitclone;
pub mod linking;
pub mod pr_analyze;
pub mod report;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use args::{Cli, Command};
use config::Settings;
use error::CliError;

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            report::print_error(&err.to_string());
            return ExitCode::from(1);
        }
    };

    match dispatch(&settings, cli.command).await {
        Ok(()) => ExitCode::from(0),
        Err(err @ CliError::BaselineExists { .. }) => {
            report::print_error(&err.to_string());
            ExitCode::from(2)
        }
        Err(err) => {
            error!(error = %err, "command failed");
            report::print_error(&err.to_string());
            ExitCode::from(1)
        }
    }
}

async fn dispatch(settings: &Settings, command: Command) -> Result<(), CliError> {
    match command {
        Command::BaselineCreate { repository, branch, force } => {
            let stats = baseline_create::run(settings, repository, branch, force).await?;
            report::print_processing_stats(&stats);
            Ok(())
        }
        Command::BaselineUpdate { repository, branch, commit_sha } => {
            let stats = baseline_update::run(settings, repository, branch, commit_sha).await?;
            report::print_processing_stats(&stats);
            Ok(())
        }
        Command::PrAnalyze { pr_url } => {
            let recommendations = pr_analyze::run(settings, pr_url).await?;
            report::print_recommendations(&recommendations);
            Ok(())
        }
    }
}
