//! CLI argument parsing for marksheet
//!
//! Global flags: --root, --store, --format, --quiet, --verbose, --log-level,
//! --log-json

pub mod args;
pub mod format;
pub mod output;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{
    ApportionArgs, ExportArgs, GroupBy, ImportArgs, ListArgs, ShowArgs, SliceArgs, WeightsArgs,
};
pub use output::OutputFormat;

/// Marksheet - reconcile project review marks from committee spreadsheets
#[derive(Parser, Debug)]
#[command(name = "marksheet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directives (e.g. "debug", "marksheet_core=trace")
    #[arg(long, global = true, env = "MARKSHEET_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new marksheet store
    Init,

    /// Import a spreadsheet into one phase/review, replacing its marks
    Import(ImportArgs),

    /// List canonical marks for a phase/review
    List(ListArgs),

    /// Show one student's evaluations
    Show(ShowArgs),

    /// Export a phase/review as CSV
    Export(ExportArgs),

    /// Show weight configurations
    Weights(WeightsArgs),

    /// Split a total across a configuration's criteria
    Apportion(ApportionArgs),
}
