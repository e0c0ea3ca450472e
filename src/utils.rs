use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// Read and parse a single JSON file using a buffered stream
/// so large annotation exports are never loaded as one string.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = fs::File::open(path).map_err(|e| ConvertError::io(path, e))?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConvertError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
            label
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Create an output directory if it is missing. Existing directories are kept
/// as-is; files inside are overwritten pair by pair.
pub fn create_output_directory(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        log::debug!("Reusing existing output directory {:?}", path);
    } else {
        fs::create_dir_all(path).map_err(|e| ConvertError::io(path, e))?;
    }
    Ok(path.to_path_buf())
}
