//! Uniform parameter declarations and their buffer layout

pub mod declaration;
pub mod descriptor;
pub mod scanner;
pub mod types;

pub use declaration::parse_declaration;
pub use descriptor::{ParameterDescriptor, ParameterTable, DEFAULT_MEAN, DEFAULT_SCALE, SLOT_BYTES};
pub use scanner::{parse_kernel, scan_parameters, ParamScanner};
pub use types::{align_offset, ParamType, Std140Layout};
