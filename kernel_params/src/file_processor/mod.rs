//! Kernel file loading with compile-time limits and global logging integration

mod processor;

use crate::config::runtime::FileProcessorPreferences;
pub use processor::{FileMetadata, FileProcessor, FileProcessorError, LoadedKernel};

/// Load a kernel file with preferences taken from the environment
pub fn load_file(file_path: &str) -> Result<LoadedKernel, FileProcessorError> {
    FileProcessor::new().load(file_path)
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs.clone())
}
