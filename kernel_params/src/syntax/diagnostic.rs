//! Reportable parse failures

use crate::logging::Code;
use crate::utils::SourcePosition;
use serde::Serialize;

/// A parse failure resolved to a document, line and column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("<{document}>: line {}: col {}: error: {message}", .position.line, .position.column)]
pub struct Diagnostic {
    pub document: String,
    pub position: SourcePosition,
    pub code: Code,
    pub message: String,
}

impl Diagnostic {
    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    pub fn offset(&self) -> usize {
        self.position.offset
    }
}
