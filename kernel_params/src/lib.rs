// Internal modules
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod params;
pub mod pipeline;
pub mod syntax;
pub mod utils;

// Re-export key types for library consumers
pub use params::{parse_kernel, scan_parameters, ParamType, ParameterDescriptor, ParameterTable};
pub use pipeline::{load_kernel, KernelError, KernelOutput};
pub use syntax::{Diagnostic, ParseError};
