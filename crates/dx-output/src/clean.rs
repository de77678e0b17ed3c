use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::OutputError;

/// Files produced by extraction and formatting.
pub const OUTPUT_FILE_NAMES: [&str; 3] = ["output.jsonl", "output.json", "output.csv"];

/// Removes previous outputs from `dir` and returns the paths that existed.
pub fn clean_outputs(dir: &Path) -> Result<Vec<PathBuf>, OutputError> {
    let mut removed = Vec::new();
    for name in OUTPUT_FILE_NAMES {
        let path = dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "removed output");
                removed.push(path);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(OutputError::io(&path, e)),
        }
    }
    Ok(removed)
}
