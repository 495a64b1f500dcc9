use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::Split;

/// Normalized image samples laid out as (height, width, channel)
pub type PixelGrid = Array3<f32>;

// An entry of the COCO `images` array
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: u64,
    pub file_name: String,
}

// The parts of a COCO annotation document the preprocessor reads
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    pub images: Vec<ImageRecord>,
}

/// Result of processing a single image record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Processed { file_name: String, output: PathBuf },
    Failed { file_name: String, reason: String },
}

impl RecordOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            RecordOutcome::Processed { file_name, .. } | RecordOutcome::Failed { file_name, .. } => {
                file_name
            }
        }
    }

    pub fn is_processed(&self) -> bool {
        matches!(self, RecordOutcome::Processed { .. })
    }
}

// Per-record outcomes of one split run, in annotation order
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub split: Split,
    pub output_dir: PathBuf,
    pub outcomes: Vec<RecordOutcome>,
}

impl SplitReport {
    pub fn new(split: Split, output_dir: PathBuf) -> Self {
        Self {
            split,
            output_dir,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_processed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.processed()
    }

    /// Iterate over the records that could not be processed
    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_processed())
    }

    pub fn log_summary(&self) {
        log::info!("=== {} Summary ===", self.split);
        log::info!("Total images: {}", self.total());
        log::info!("Processed: {}", self.processed());
        log::info!("Failed: {}", self.failed());

        if self.failed() > 0 {
            log::warn!(
                "{} of {} {} images could not be processed",
                self.failed(),
                self.total(),
                self.split
            );
        }
    }
}
