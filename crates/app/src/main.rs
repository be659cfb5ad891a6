//! Tally CLI - transaction categorization reports
//!
//! Usage:
//!   tally report --input ./input --categories ./input/category_list.csv
//!   tally report --input ./input --categories ./input/category_list.csv --budget ./input/budget.csv
//!   tally drilldown Groceries --input ./input --categories ./input/category_list.csv

mod cli;
mod commands;
mod render;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_engine_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Report {
            input,
            categories,
            budget,
            export,
            json,
        } => commands::cmd_report(
            &config,
            &input,
            &categories,
            budget.as_deref(),
            export.as_deref(),
            json,
        ),
        Commands::Drilldown {
            category,
            input,
            categories,
        } => commands::cmd_drilldown(&config, &category, &input, &categories),
    }
}
