use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Engine-wide conventions, passed explicitly into every core operation so the
/// pipeline stays a pure function of its inputs. The defaults match the common
/// bank-export shapes; a TOML file can override any subset of fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Exact date header candidates, checked in order before the substring
    /// fallback.
    pub date_columns: Vec<String>,
    /// Lower-cased substring used as the last-resort date header match.
    pub date_substring: String,
    /// Exact header carrying a signed amount.
    pub amount_column: String,
    /// Header pair merged into a signed amount when `amount_column` is absent.
    pub credit_column: String,
    pub debit_column: String,
    /// Exact description header candidates, checked in order.
    pub description_columns: Vec<String>,
    /// Accepted input date formats, tried in order.
    pub date_formats: Vec<String>,
    /// Label assigned when no merchant pattern matches.
    pub default_category: String,
    /// Reserved category name whose patterns exclude transactions outright.
    /// Matched case-insensitively against column headers.
    pub ignore_category: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            date_columns: vec![
                "Date".to_string(),
                "Post Date".to_string(),
                "Transaction Date".to_string(),
            ],
            date_substring: "date".to_string(),
            amount_column: "Amount".to_string(),
            credit_column: "Credit".to_string(),
            debit_column: "Debit".to_string(),
            description_columns: vec!["Description".to_string(), "Desc".to_string()],
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%m/%d/%Y".to_string(),
                "%d/%m/%Y".to_string(),
                "%Y/%m/%d".to_string(),
                "%m-%d-%Y".to_string(),
                "%d-%m-%Y".to_string(),
            ],
            default_category: "Uncategorized".to_string(),
            ignore_category: "ignore".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EngineConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }
}
