use log::{debug, error, info};
use std::path::{Component, Path, PathBuf};

use crate::annotations::load_annotations;
use crate::config::{PreprocessConfig, Split, SplitPaths};
use crate::error::{PreprocessError, Result};
use crate::transform::{preprocess_image, save_pixel_grid};
use crate::types::{ImageRecord, RecordOutcome, SplitReport};
use crate::utils::{create_progress_bar, ensure_output_directory};

/// Normalizes and re-encodes the images of COCO dataset splits.
#[derive(Debug, Clone)]
pub struct DatasetPreprocessor {
    config: PreprocessConfig,
}

impl DatasetPreprocessor {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Process every image listed in the split's annotation file.
    ///
    /// Annotation and output-directory errors are returned before any image is
    /// touched. Failures of individual images are recorded in the report and
    /// never abort the split.
    pub fn run(&self, split: Split) -> Result<SplitReport> {
        let paths = self.config.split_paths(split);
        let annotations = load_annotations(&paths.annotations_path)?;
        self.run_records(split, &annotations.images)
    }

    /// Process an already loaded list of image records for a split
    pub fn run_records(&self, split: Split, records: &[ImageRecord]) -> Result<SplitReport> {
        let SplitPaths {
            images_dir,
            output_dir,
            ..
        } = self.config.split_paths(split);
        let output_dir = ensure_output_directory(&output_dir)?;

        info!("Processing {} dataset...", split);
        let pb = create_progress_bar(records.len() as u64, &format!("{} images", split));
        let mut report = SplitReport::new(split, output_dir.clone());

        for record in records {
            let outcome = match process_record(record, &images_dir, &output_dir) {
                Ok(output) => {
                    debug!("Wrote {}", output.display());
                    RecordOutcome::Processed {
                        file_name: record.file_name.clone(),
                        output,
                    }
                }
                Err(e) => {
                    error!("Error processing {}: {}", record.file_name, e);
                    RecordOutcome::Failed {
                        file_name: record.file_name.clone(),
                        reason: e.to_string(),
                    }
                }
            };
            report.record(outcome);
            pb.inc(1);
        }
        pb.finish_with_message(format!("{} processing complete", split));

        info!(
            "{} preprocessing complete! Processed images saved to {}",
            split,
            output_dir.display()
        );
        report.log_summary();
        Ok(report)
    }
}

/// Normalize one image and write its re-quantized copy under the output directory
fn process_record(record: &ImageRecord, images_dir: &Path, output_dir: &Path) -> Result<PathBuf> {
    check_file_name(&record.file_name)?;
    let image_path = images_dir.join(&record.file_name);
    let grid = preprocess_image(&image_path)?;

    let save_path = output_dir.join(&record.file_name);
    if let Some(parent) = save_path.parent() {
        ensure_output_directory(parent)?;
    }
    save_pixel_grid(&grid, &save_path)?;
    Ok(save_path)
}

/// Reject file names that are absolute or climb out of the split directory
fn check_file_name(file_name: &str) -> Result<()> {
    let path = Path::new(file_name);
    let relative = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if file_name.is_empty() || !relative {
        return Err(PreprocessError::InvalidFileName {
            file_name: file_name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_file_name() {
        assert!(check_file_name("000000000139.jpg").is_ok());
        assert!(check_file_name("nested/./a.png").is_ok());
        assert!(check_file_name("../escape.png").is_err());
        assert!(check_file_name("nested/../../escape.png").is_err());
        assert!(check_file_name("/etc/escape.png").is_err());
        assert!(check_file_name("").is_err());
    }
}
