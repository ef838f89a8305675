//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Any-two inter-rater agreement.
///
/// Compares coding sheets from several observers pair by pair and reports
/// how often any two of them assigned the same code to the same occurrence.
#[derive(Debug, Parser)]
#[command(name = "anytwo", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare every pair of coding sheets and report agreement.
    Compare {
        #[command(flatten)]
        input: InputArgs,

        /// Directory receiving the exported CSV tables.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print pair summaries as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Only report, do not write CSV tables.
        #[arg(long)]
        no_export: bool,
    },

    /// Validate coding sheets without comparing them.
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Options shared by commands that read coding sheets.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Directory holding one CSV coding sheet per observer.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Tolerance window in seconds added around every breakdown.
    #[arg(short, long)]
    pub threshold: Option<u32>,

    /// Skip invalid rows instead of aborting.
    #[arg(long)]
    pub skip_invalid: bool,
}
