use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use tally_core::Money;

/// Monthly limits per category name, from a two-column `Category,Budget` CSV.
/// Names with no counterpart in the category table are inert, not errors.
#[derive(Debug, Clone, Default)]
pub struct BudgetTable {
    budgets: HashMap<String, Money>,
}

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("budget file missing required column {0:?}")]
    MissingColumn(&'static str),
}

impl BudgetTable {
    pub fn from_reader<R: Read>(data: R) -> Result<Self, BudgetError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);
        let headers = reader.headers()?.clone();

        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let category_col = position("Category").ok_or(BudgetError::MissingColumn("Category"))?;
        let budget_col = position("Budget").ok_or(BudgetError::MissingColumn("Budget"))?;

        let mut budgets = HashMap::new();
        for result in reader.records() {
            let record = result?;
            let category = record.get(category_col).unwrap_or_default().trim();
            if category.is_empty() {
                continue;
            }
            let raw = record.get(budget_col).unwrap_or_default();
            let amount = match Money::parse(raw) {
                Ok(amount) if amount >= Money::zero() => amount,
                Ok(_) => {
                    warn!("negative budget for {category:?} skipped");
                    continue;
                }
                Err(_) => {
                    warn!("invalid budget value {raw:?} for {category:?} skipped");
                    continue;
                }
            };
            budgets.insert(category.to_string(), amount);
        }

        info!("loaded budgets for {} categories", budgets.len());
        Ok(Self { budgets })
    }

    pub fn from_path(path: &Path) -> Result<Self, BudgetError> {
        Self::from_reader(std::fs::File::open(path)?)
    }

    pub fn get(&self, category: &str) -> Option<Money> {
        self.budgets.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}
