use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::types::OutputDirs;
use crate::utils::create_output_directory;

/// Set up the `lidar/` and `label/` output trees under `out_dir`
pub fn setup_output_directories(out_dir: &Path) -> Result<OutputDirs> {
    let dirs = OutputDirs::new(out_dir);
    create_output_directory(&dirs.lidar_dir)?;
    create_output_directory(&dirs.label_dir)?;
    Ok(dirs)
}

/// Fail early when an input directory is missing
pub fn ensure_input_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConvertError::MissingInputDir(path.to_path_buf()))
    }
}

/// List the regular files directly inside `dir` that carry `extension`,
/// sorted by file name. The order is what assigns pair indices.
///
/// The pattern is matched against entry names only, so the directory path
/// itself may be any OS string.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(&format!("*.{}", Pattern::escape(extension)))?;

    let entries = fs::read_dir(dir).map_err(|e| ConvertError::io(dir, e))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
