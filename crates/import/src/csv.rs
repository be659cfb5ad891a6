use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use tally_core::{EngineConfig, Money, Transaction};

/// Where a file's signed amount comes from: a single column, or a
/// credit/debit pair merged per row as `credit - debit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountColumns {
    Single(usize),
    Split { credit: usize, debit: usize },
}

/// Resolved header indices for one input file. Resolution runs independently
/// per file and is never cached across files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub amount: AmountColumns,
    pub description: usize,
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{file}: no date column among {headers:?}")]
    NoDateColumn { file: String, headers: Vec<String> },
    #[error("{file}: no amount column (single or credit/debit pair) among {headers:?}")]
    NoAmountColumn { file: String, headers: Vec<String> },
    #[error("{file}: no description column among {headers:?}")]
    NoDescriptionColumn { file: String, headers: Vec<String> },
}

/// A single row that failed coercion. Skipped and counted, never fatal.
#[derive(Error, Debug)]
pub enum RowParseError {
    #[error("unparseable amount {0:?}")]
    Amount(String),
    #[error("unparseable date {0:?}")]
    Date(String),
}

/// Per-file normalization outcome.
#[derive(Debug)]
pub struct NormalizedFile {
    pub transactions: Vec<Transaction>,
    pub columns: ColumnMap,
    /// Rows dropped because their amount or date failed coercion.
    pub skipped: usize,
}

/// Maps a file's headers onto the canonical columns.
///
/// Priority per column kind: exact candidates in configured order, then (for
/// the date only) the first header whose lower-cased text contains the
/// configured substring. Headers are compared trimmed; surplus columns are
/// ignored.
pub fn resolve_columns(
    headers: &csv::StringRecord,
    source_file: &str,
    config: &EngineConfig,
) -> Result<ColumnMap, SchemaError> {
    let names: Vec<&str> = headers.iter().map(str::trim).collect();
    let exact = |candidate: &str| names.iter().position(|h| *h == candidate);

    let date = config
        .date_columns
        .iter()
        .find_map(|c| exact(c))
        .or_else(|| {
            names
                .iter()
                .position(|h| h.to_lowercase().contains(&config.date_substring))
        })
        .ok_or_else(|| SchemaError::NoDateColumn {
            file: source_file.to_string(),
            headers: owned(&names),
        })?;

    let amount = if let Some(idx) = exact(&config.amount_column) {
        AmountColumns::Single(idx)
    } else {
        match (exact(&config.credit_column), exact(&config.debit_column)) {
            (Some(credit), Some(debit)) => AmountColumns::Split { credit, debit },
            _ => {
                return Err(SchemaError::NoAmountColumn {
                    file: source_file.to_string(),
                    headers: owned(&names),
                })
            }
        }
    };

    let description = config
        .description_columns
        .iter()
        .find_map(|c| exact(c))
        .ok_or_else(|| SchemaError::NoDescriptionColumn {
            file: source_file.to_string(),
            headers: owned(&names),
        })?;

    Ok(ColumnMap {
        date,
        amount,
        description,
    })
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Normalizes every record of one file. Schema resolution failures are fatal
/// for the file; row coercion failures are skipped and counted.
pub fn normalize_reader<R: Read>(
    reader: &mut csv::Reader<R>,
    source_file: &str,
    config: &EngineConfig,
) -> Result<NormalizedFile, SchemaError> {
    let headers = reader.headers()?.clone();
    let columns = resolve_columns(&headers, source_file, config)?;
    info!("{source_file}: resolved columns {columns:?}");

    let mut transactions = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        if record.is_empty() {
            continue;
        }
        match normalize_record(&record, &columns, source_file, config) {
            Ok(tx) => transactions.push(tx),
            Err(e) => {
                skipped += 1;
                warn!("{source_file}: skipping row: {e}");
            }
        }
    }

    info!(
        "{source_file}: normalized {} transactions ({} skipped)",
        transactions.len(),
        skipped
    );

    Ok(NormalizedFile {
        transactions,
        columns,
        skipped,
    })
}

/// Opens and normalizes one file from disk; the file name becomes
/// `Transaction::source_file`.
pub fn normalize_path(path: &Path, config: &EngineConfig) -> Result<NormalizedFile, SchemaError> {
    let source_file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = std::fs::File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    normalize_reader(&mut reader, &source_file, config)
}

fn normalize_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    source_file: &str,
    config: &EngineConfig,
) -> Result<Transaction, RowParseError> {
    let date_raw = record.get(columns.date).unwrap_or_default().trim();
    let date = parse_date(date_raw, &config.date_formats)
        .ok_or_else(|| RowParseError::Date(date_raw.to_string()))?;

    let amount = match columns.amount {
        AmountColumns::Single(idx) => {
            let raw = record.get(idx).unwrap_or_default();
            Money::parse(raw).map_err(|_| RowParseError::Amount(raw.to_string()))?
        }
        AmountColumns::Split { credit, debit } => {
            // Inflow minus outflow: a debit-only row comes out negative.
            let credit = optional_amount(record.get(credit))?;
            let debit = optional_amount(record.get(debit))?;
            credit - debit
        }
    };

    Ok(Transaction {
        date,
        amount,
        description: record
            .get(columns.description)
            .unwrap_or_default()
            .trim()
            .to_string(),
        source_file: source_file.to_string(),
    })
}

/// Empty credit/debit cells read as zero; anything non-empty must parse.
fn optional_amount(field: Option<&str>) -> Result<Money, RowParseError> {
    match field.map(str::trim) {
        None | Some("") => Ok(Money::zero()),
        Some(raw) => Money::parse(raw).map_err(|_| RowParseError::Amount(raw.to_string())),
    }
}

fn parse_date(s: &str, formats: &[String]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
