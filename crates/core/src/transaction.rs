use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A single normalized transaction. Created once by the column normalizer and
/// immutable afterwards; `date` renders as ISO-8601 through `NaiveDate`'s
/// `Display`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Money,
    pub description: String,
    pub source_file: String,
}

/// Outcome of classification: a category name (including the configured
/// default label for unmatched descriptions), or exclusion from all reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Category(String),
    Excluded,
}

impl Classification {
    pub fn name(&self) -> Option<&str> {
        match self {
            Classification::Category(name) => Some(name),
            Classification::Excluded => None,
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Classification::Excluded)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedTransaction {
    pub transaction: Transaction,
    pub classification: Classification,
}

impl ClassifiedTransaction {
    /// Category name, `None` for excluded transactions.
    pub fn category(&self) -> Option<&str> {
        self.classification.name()
    }

    pub fn is_excluded(&self) -> bool {
        self.classification.is_excluded()
    }
}
