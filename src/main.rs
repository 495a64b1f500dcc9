use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use coco_preprocess::utils::ensure_output_directory;
use coco_preprocess::{Args, DatasetPreprocessor};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let preprocessor = DatasetPreprocessor::new(args.to_config());
    let preprocessed_root = preprocessor.config().preprocessed_root();
    if let Err(e) = ensure_output_directory(preprocessed_root) {
        error!("Failed to set up output directory: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting the preprocessing of {} split(s)...", args.splits.len());

    for split in &args.splits {
        if let Err(e) = preprocessor.run(*split) {
            error!("Failed to process {} split: {}", split, e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
