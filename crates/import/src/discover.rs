use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("input path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("no transaction CSV files found in {0}")]
    NoInputs(PathBuf),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Finds the transaction CSVs for a run. A `transactions/` subdirectory is
/// preferred when present; category and budget definition files living next
/// to the inputs are excluded by name. Results come back sorted so runs are
/// reproducible.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    if !dir.is_dir() {
        return Err(DiscoverError::NotADirectory(dir.to_path_buf()));
    }

    let preferred = dir.join("transactions");
    let root = if preferred.is_dir() {
        preferred
    } else {
        warn!(
            "no transactions/ subfolder in {}, scanning the directory directly",
            dir.display()
        );
        dir.to_path_buf()
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if !name.ends_with(".csv") || name.contains("category") || name.contains("budget") {
            continue;
        }
        files.push(entry.into_path());
    }
    files.sort();

    if files.is_empty() {
        return Err(DiscoverError::NoInputs(root));
    }
    info!("found {} transaction files in {}", files.len(), root.display());
    Ok(files)
}
