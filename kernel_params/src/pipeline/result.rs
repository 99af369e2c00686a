use crate::file_processor::FileMetadata;
use crate::logging::codes;
use crate::params::ParameterTable;
use std::time::Duration;

/// A kernel file loaded from disk and turned into its parameter table
#[derive(Debug, Clone)]
pub struct KernelOutput {
    pub document: String,
    pub table: ParameterTable,
    pub file_metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl KernelOutput {
    pub fn log_success(&self) {
        crate::log_success!(
            codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Kernel parameters extracted",
            "file" => self.document.as_str(),
            "params" => self.table.len(),
            "buffer_bytes" => self.table.buffer_size_bytes(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
