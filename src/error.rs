use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PreprocessError>;

/// Errors raised while preprocessing a dataset split.
///
/// Annotation and output-directory errors abort the split. Image errors are
/// caught per record by the dataset preprocessor and never abort the split.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("annotation file not found: {path}")]
    AnnotationsNotFound { path: PathBuf },

    #[error("failed to parse annotation file {path}: {source}")]
    AnnotationsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("file name {file_name:?} does not stay inside the image directory")]
    InvalidFileName { file_name: String },

    #[error("failed to encode image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot encode {channels}-channel image to {path}")]
    UnsupportedChannels { path: PathBuf, channels: usize },
}
