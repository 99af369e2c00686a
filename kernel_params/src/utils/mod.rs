//! Shared helpers for source positions and diagnostics rendering

pub mod position;

pub use position::{SourceMap, SourcePosition};
