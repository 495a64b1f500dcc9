//! Loading of COCO annotation documents.

use log::info;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use crate::error::{PreprocessError, Result};
use crate::types::AnnotationSet;

/// Read and parse a COCO annotation file into its ordered list of image records.
///
/// Only the `images` array is read; every other key of the document is ignored.
pub fn load_annotations(path: &Path) -> Result<AnnotationSet> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => PreprocessError::AnnotationsNotFound {
            path: path.to_path_buf(),
        },
        _ => PreprocessError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let annotations: AnnotationSet = serde_json::from_reader(BufReader::new(file)).map_err(
        |source| PreprocessError::AnnotationsParse {
            path: path.to_path_buf(),
            source,
        },
    )?;

    info!(
        "Loaded {} image records from {}",
        annotations.images.len(),
        path.display()
    );
    Ok(annotations)
}
