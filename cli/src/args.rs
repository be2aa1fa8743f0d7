//! Argument parsing (spec §6), modeled on the pack's `clap`-derive idiom
//! since the teacher parses no CLI args of its own (it's an HTTP service).

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tracelink", version, about = "Traceability graph builder, incremental updater, and PR impact analyzer.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Builds a fresh baseline traceability map for a repository/branch.
    BaselineCreate {
        /// `owner/repo`.
        repository: String,
        #[arg(long, default_value = "main")]
        branch: String,
        /// Recreate the map even if one already exists.
        #[arg(long)]
        force: bool,
    },
    /// Incrementally relinks an existing baseline against a new commit.
    BaselineUpdate {
        #[arg(long)]
        repository: String,
        #[arg(long)]
        branch: String,
        #[arg(long)]
        commit_sha: String,
    },
    /// Runs Core C impact analysis over one pull request.
    PrAnalyze {
        /// Full pull request URL.
        pr_url: String,
    },
}
