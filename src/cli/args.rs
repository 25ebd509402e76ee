//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs, clear::ClearArgs, completions::CompletionsArgs, export::ExportArgs,
    history::HistoryArgs, list::ListArgs,
};

#[derive(Parser)]
#[command(name = "qdl")]
#[command(author, version, about = "Quality defect ledger")]
#[command(
    long_about = "A CLI for logging manufacturing defect records per part and production area. Repeated entries for the same part/area pair merge into a single row with accumulated counts and append-only note and date logs; reports group rows by part."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Ledger workbook path (default: engineering_data.xlsx)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Input-history file path (default: input_history.json)
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a defect entry for a part and production area
    Add(AddArgs),

    /// Show the ledger grouped by part
    List(ListArgs),

    /// Write the ledger workbook and input history to disk
    Export(ExportArgs),

    /// Remove every record from the ledger
    Clear(ClearArgs),

    /// Show remembered input values used for suggestions
    History(HistoryArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context
    #[default]
    Auto,
    /// Tab-separated values (for terminals)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// JSON format (for programming)
    Json,
    /// Markdown tables
    Md,
}
