use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use crate::syntax::Diagnostic;

/// Errors from loading and parsing a kernel document
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("{0}")]
    Parse(#[from] Diagnostic),
}

impl KernelError {
    pub fn error_code(&self) -> Code {
        match self {
            KernelError::FileProcessing(e) => e.error_code(),
            KernelError::Parse(d) => d.code,
        }
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    /// The parse diagnostic, when the failure happened inside the document
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            KernelError::Parse(d) => Some(d),
            KernelError::FileProcessing(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ParseError;

    #[test]
    fn test_codes_pass_through() {
        let error = KernelError::from(FileProcessorError::EmptyFile {
            path: "a.kernel".to_string(),
        });
        assert_eq!(error.error_code(), codes::file_processing::EMPTY_FILE);
        assert!(error.diagnostic().is_none());

        let diagnostic = ParseError::MissingTerminator { offset: 3 }.diagnostic("abc", "k");
        let error = KernelError::from(diagnostic);
        assert_eq!(error.error_code(), codes::syntax::MISSING_TERMINATOR);
        assert_eq!(error.to_string(), error.diagnostic().unwrap().to_string());
    }
}
