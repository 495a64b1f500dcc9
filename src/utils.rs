use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PreprocessError, Result};

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(&format!(
        "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
        label
    ))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Create an output directory if it is missing, keeping any existing content
pub fn ensure_output_directory(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        log::debug!("Directory {:?} already exists.", path);
    } else {
        fs::create_dir_all(path).map_err(|source| PreprocessError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(path.to_path_buf())
}
