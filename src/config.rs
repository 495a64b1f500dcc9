use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::{Path, PathBuf};

/// Command-line arguments for normalizing the images of COCO dataset splits.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Root directory holding the `<split>2017` image folders
    #[arg(long = "images_root", default_value = "data/coco/images")]
    pub images_root: PathBuf,

    /// Directory holding the `instances_<split>2017.json` annotation files
    #[arg(long = "annotations_root", default_value = "data/coco/annotations")]
    pub annotations_root: PathBuf,

    /// Root directory the preprocessed `<split>2017` folders are written to
    #[arg(long = "preprocessed_root", default_value = "data/coco/preprocessed")]
    pub preprocessed_root: PathBuf,

    /// Splits to process, in order
    #[arg(
        long = "splits",
        value_enum,
        value_delimiter = ',',
        default_values_t = vec![Split::Train, Split::Val]
    )]
    pub splits: Vec<Split>,
}

impl Args {
    /// Build the library configuration from the parsed arguments
    pub fn to_config(&self) -> PreprocessConfig {
        PreprocessConfig {
            images_root: self.images_root.clone(),
            annotations_root: self.annotations_root.clone(),
            preprocessed_root: self.preprocessed_root.clone(),
        }
    }
}

// Dataset split label
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug)]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }

    /// Directory name used for both input and output images, e.g. `train2017`
    pub fn dir_name(&self) -> String {
        format!("{}2017", self.as_str())
    }

    /// File name of the split's annotation document
    pub fn annotations_file_name(&self) -> String {
        format!("instances_{}2017.json", self.as_str())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root directories the preprocessor reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessConfig {
    pub images_root: PathBuf,
    pub annotations_root: PathBuf,
    pub preprocessed_root: PathBuf,
}

impl PreprocessConfig {
    pub fn new(
        images_root: impl Into<PathBuf>,
        annotations_root: impl Into<PathBuf>,
        preprocessed_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            images_root: images_root.into(),
            annotations_root: annotations_root.into(),
            preprocessed_root: preprocessed_root.into(),
        }
    }

    /// Resolve the input, annotation and output paths for a split
    pub fn split_paths(&self, split: Split) -> SplitPaths {
        SplitPaths {
            images_dir: self.images_root.join(split.dir_name()),
            annotations_path: self.annotations_root.join(split.annotations_file_name()),
            output_dir: self.preprocessed_root.join(split.dir_name()),
        }
    }

    pub fn preprocessed_root(&self) -> &Path {
        &self.preprocessed_root
    }
}

// Paths resolved for a single split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPaths {
    pub images_dir: PathBuf,
    pub annotations_path: PathBuf,
    pub output_dir: PathBuf,
}
