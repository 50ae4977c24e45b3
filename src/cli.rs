use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Exact absorption probabilities for absorbing Markov chains.
#[derive(Parser)]
#[command(
    name = "absorb",
    version,
    about = "Exact absorption probabilities for absorbing Markov chains"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Solve for absorption probabilities from the start state.
    Solve(SolveArgs),
    /// Classify states as transient or absorbing without solving.
    Check(CheckArgs),
}

/// Output format for `solve`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Space-separated numerators followed by the denominator.
    #[default]
    Plain,
    /// A JSON object; integers are decimal strings.
    Json,
}

/// Arguments for the `solve` subcommand.
#[derive(clap::Args)]
pub struct SolveArgs {
    /// Path to TOML chain file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Also report the expected number of steps before absorption.
    #[arg(long)]
    pub steps: bool,

    /// Override `[solver].max_states` from the chain file.
    #[arg(long)]
    pub max_states: Option<usize>,

    /// Override `[solver].start_state` from the chain file.
    #[arg(short, long)]
    pub start: Option<usize>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML chain file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Override `[solver].max_states` from the chain file.
    #[arg(long)]
    pub max_states: Option<usize>,
}
