//! Subcommand argument structures

use std::path::PathBuf;

use clap::{Args, ValueEnum};

/// Phase/review selection; unset values fall back to the store's defaults
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct SliceArgs {
    /// Project phase (defaults to `default_phase` from config)
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    pub phase: Option<u32>,

    /// Review within the phase (defaults to `default_review` from config)
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    pub review: Option<u32>,
}

/// Arguments for the import command.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Spreadsheet to import (.xlsx, .xls, .ods, .csv, ...)
    pub file: PathBuf,

    #[command(flatten)]
    pub slice: SliceArgs,
}

/// How `list` groups its rows
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// One block per project group
    Group,
    /// One block per project guide
    Guide,
}

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub slice: SliceArgs,

    /// Group the listing
    #[arg(long, value_enum)]
    pub by: Option<GroupBy>,
}

/// Arguments for the show command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Seat / enrollment number
    pub seat_no: String,

    #[command(flatten)]
    pub slice: SliceArgs,
}

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub slice: SliceArgs,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for the weights command.
#[derive(Args, Debug)]
pub struct WeightsArgs {
    /// Only show this phase (requires --review)
    #[arg(
        long,
        short,
        requires = "review",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub phase: Option<u32>,

    /// Only show this review (requires --phase)
    #[arg(
        long,
        short,
        requires = "phase",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub review: Option<u32>,
}

/// Arguments for the apportion command.
#[derive(Args, Debug)]
pub struct ApportionArgs {
    /// Total to split across the criteria
    pub total: u32,

    #[command(flatten)]
    pub slice: SliceArgs,
}
