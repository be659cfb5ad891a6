//! CLI argument definitions using clap. Command implementations live in the
//! `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - categorize bank CSV exports and report spending by category
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Categorize bank/card CSV exports into spending reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML file overriding engine defaults (column names, labels, formats)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Categorize transactions and print the spending summary
    Report {
        /// Directory containing transaction CSV files (a transactions/
        /// subfolder is preferred when present)
        #[arg(short, long)]
        input: PathBuf,

        /// Category definition CSV: headers are category names, cells are
        /// merchant patterns
        #[arg(short, long)]
        categories: PathBuf,

        /// Budget CSV (Category,Budget) to compare against
        #[arg(short, long)]
        budget: Option<PathBuf>,

        /// Export the summary to a CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List every transaction behind one category
    Drilldown {
        /// Category name (case-insensitive)
        category: String,

        /// Directory containing transaction CSV files
        #[arg(short, long)]
        input: PathBuf,

        /// Category definition CSV
        #[arg(short, long)]
        categories: PathBuf,
    },
}
