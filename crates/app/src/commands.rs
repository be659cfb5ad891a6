use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::warn;

use tally_core::{ClassifiedTransaction, EngineConfig};
use tally_import::{
    classify_all, discover_inputs, normalize_path, BudgetTable, CategoryTable,
};
use tally_report::{drilldown, summarize, write_summary_csv};

use crate::render;

pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::from_path(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Shared front half of every command: discover inputs, normalize each file
/// independently, classify against the category table. A file whose schema
/// cannot be resolved is skipped with a warning; the run only fails when no
/// transactions at all could be loaded.
pub fn load_classified(
    config: &EngineConfig,
    input: &Path,
    categories: &Path,
) -> Result<Vec<ClassifiedTransaction>> {
    let table = CategoryTable::from_path(categories)
        .with_context(|| format!("failed to load categories from {}", categories.display()))?;
    for (pattern, first, second) in table.duplicate_patterns() {
        warn!("pattern {pattern:?} appears under both {first:?} and {second:?}; {first:?} wins");
    }

    let files = discover_inputs(input)?;

    let mut transactions = Vec::new();
    let mut failed_files = 0usize;
    for file in &files {
        match normalize_path(file, config) {
            Ok(normalized) => transactions.extend(normalized.transactions),
            Err(e) => {
                failed_files += 1;
                warn!("skipping {}: {e}", file.display());
            }
        }
    }
    if failed_files > 0 {
        warn!("{failed_files}/{} files could not be processed", files.len());
    }
    if transactions.is_empty() {
        bail!("no transactions could be loaded from {}", input.display());
    }

    Ok(classify_all(transactions, &table, config))
}

pub fn cmd_report(
    config: &EngineConfig,
    input: &Path,
    categories: &Path,
    budget: Option<&Path>,
    export: Option<&Path>,
    json: bool,
) -> Result<()> {
    let classified = load_classified(config, input, categories)?;

    let budgets = budget
        .map(|p| {
            BudgetTable::from_path(p)
                .with_context(|| format!("failed to load budgets from {}", p.display()))
        })
        .transpose()?;

    let summary = summarize(&classified, budgets.as_ref());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render::summary_table(&summary, &classified, config);
    }

    if let Some(path) = export {
        let file = File::create(path)
            .with_context(|| format!("failed to create export file {}", path.display()))?;
        write_summary_csv(file, &summary)?;
        println!("Exported summary to {}", path.display());
    }

    Ok(())
}

pub fn cmd_drilldown(
    config: &EngineConfig,
    category: &str,
    input: &Path,
    categories: &Path,
) -> Result<()> {
    let classified = load_classified(config, input, categories)?;
    let result = drilldown(category, &classified);
    render::drilldown_table(category, &result);
    Ok(())
}
