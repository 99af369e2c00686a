mod error;
mod result;
mod validation;

pub use error::KernelError;
pub use result::KernelOutput;
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::FileProcessor;
use crate::params::{ParamScanner, ParameterTable};
use crate::syntax::Diagnostic;
use std::time::Instant;

/// Load a kernel file and build its parameter table with default preferences
pub fn load_kernel(file_path: &str) -> Result<KernelOutput, KernelError> {
    load_kernel_with_config(file_path, &RuntimeConfig::default())
}

/// Load a kernel file and build its parameter table.
///
/// Each failure has already been logged once by the stage that raised it;
/// callers should present the returned error without logging it again.
pub fn load_kernel_with_config(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<KernelOutput, KernelError> {
    let start_time = Instant::now();

    crate::log_info!("Starting kernel parameter extraction", "file" => file_path);

    let processor = FileProcessor::from_preferences(config.file_processor.clone());
    let loaded = processor.load(file_path)?;

    let scanner = ParamScanner::with_preferences(config.scanner.clone());
    let table = scanner.parse(&loaded.source, file_path)?;

    let output = KernelOutput {
        document: file_path.to_string(),
        table,
        file_metadata: loaded.metadata,
        processing_duration: start_time.elapsed(),
    };
    output.log_success();

    Ok(output)
}

/// Parse in-memory kernel source under a document name
pub fn parse_source(source: &str, document: &str) -> Result<ParameterTable, Diagnostic> {
    crate::params::parse_kernel(source, document)
}
