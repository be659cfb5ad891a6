use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use tally_core::{Classification, ClassifiedTransaction, EngineConfig, Transaction};

/// One category column: its name and its merchant patterns in authored
/// top-to-bottom order, stored upper-cased for matching.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub patterns: Vec<String>,
}

/// Ordered category definitions. Column order as read from the source file is
/// preserved; it defines match precedence.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("category file has no usable categories")]
    Empty,
}

impl CategoryTable {
    /// Reads the column-per-category CSV format: headers are category names,
    /// cells beneath are merchant patterns. Columns are ragged by nature;
    /// an empty cell in one column never terminates its siblings.
    pub fn from_reader<R: Read>(data: R) -> Result<Self, CategoryError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);
        let headers = reader.headers()?.clone();

        let mut categories: Vec<Category> = headers
            .iter()
            .map(|h| Category {
                name: h.trim().to_string(),
                patterns: Vec::new(),
            })
            .collect();

        for result in reader.records() {
            let record = result?;
            for (idx, cell) in record.iter().enumerate() {
                let cell = cell.trim();
                if cell.is_empty() {
                    continue;
                }
                if let Some(category) = categories.get_mut(idx) {
                    category.patterns.push(cell.to_uppercase());
                }
            }
        }

        categories.retain(|c| !c.name.is_empty() && !c.patterns.is_empty());
        if categories.is_empty() {
            return Err(CategoryError::Empty);
        }

        let patterns: usize = categories.iter().map(|c| c.patterns.len()).sum();
        info!("loaded {} categories ({} patterns)", categories.len(), patterns);
        Ok(Self { categories })
    }

    pub fn from_path(path: &Path) -> Result<Self, CategoryError> {
        Self::from_reader(std::fs::File::open(path)?)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn pattern_count(&self) -> usize {
        self.categories.iter().map(|c| c.patterns.len()).sum()
    }

    /// Patterns appearing under more than one category, with both category
    /// names. Precedence already resolves these deterministically; callers
    /// surface them as load-time warnings.
    pub fn duplicate_patterns(&self) -> Vec<(String, String, String)> {
        let mut seen: std::collections::HashMap<&str, &str> = std::collections::HashMap::new();
        let mut duplicates = Vec::new();
        for category in &self.categories {
            for pattern in &category.patterns {
                match seen.get(pattern.as_str()) {
                    Some(first) => duplicates.push((
                        pattern.clone(),
                        first.to_string(),
                        category.name.clone(),
                    )),
                    None => {
                        seen.insert(pattern.as_str(), category.name.as_str());
                    }
                }
            }
        }
        duplicates
    }

    /// First-match-wins classification: categories in column order, patterns
    /// top-to-bottom, upper-cased substring containment. The ignore category
    /// participates in the scan at its authored position; a hit there excludes
    /// the transaction instead of naming it.
    pub fn classify(&self, description: &str, config: &EngineConfig) -> Classification {
        let desc = description.to_uppercase();
        for category in &self.categories {
            for pattern in &category.patterns {
                if desc.contains(pattern.as_str()) {
                    if category.name.eq_ignore_ascii_case(&config.ignore_category) {
                        debug!("{description:?} excluded via {pattern:?}");
                        return Classification::Excluded;
                    }
                    debug!("{description:?} -> {:?} via {pattern:?}", category.name);
                    return Classification::Category(category.name.clone());
                }
            }
        }
        Classification::Category(config.default_category.clone())
    }
}

/// Classifies a batch and logs the distribution summary.
pub fn classify_all(
    transactions: Vec<Transaction>,
    table: &CategoryTable,
    config: &EngineConfig,
) -> Vec<ClassifiedTransaction> {
    let total = transactions.len();
    let mut excluded = 0usize;
    let mut defaulted = 0usize;

    let classified: Vec<ClassifiedTransaction> = transactions
        .into_iter()
        .map(|transaction| {
            let classification = table.classify(&transaction.description, config);
            match &classification {
                Classification::Excluded => excluded += 1,
                Classification::Category(name) if *name == config.default_category => {
                    defaulted += 1
                }
                Classification::Category(_) => {}
            }
            ClassifiedTransaction {
                transaction,
                classification,
            }
        })
        .collect();

    info!(
        "classified {}/{} transactions ({} excluded, {} uncategorized)",
        total - excluded - defaulted,
        total,
        excluded,
        defaulted
    );
    classified
}
