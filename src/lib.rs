//! COCO dataset image preprocessor
//!
//! This library reads the image list of a COCO annotation file, rescales each
//! referenced image to [0, 1] and writes the re-quantized result to a
//! preprocessed dataset directory.

pub mod annotations;
pub mod config;
pub mod dataset;
pub mod error;
pub mod transform;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use annotations::load_annotations;
pub use config::{Args, PreprocessConfig, Split, SplitPaths};
pub use dataset::DatasetPreprocessor;
pub use error::{PreprocessError, Result};
pub use transform::{preprocess_image, quantize, save_pixel_grid};
pub use types::{AnnotationSet, ImageRecord, PixelGrid, RecordOutcome, SplitReport};
