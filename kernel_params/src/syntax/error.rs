//! Parse errors for kernel parameter declarations
//!
//! Every variant carries the byte offset it is anchored to. Line and column
//! are only computed when the error is turned into a [`Diagnostic`].

use super::diagnostic::Diagnostic;
use crate::logging::{codes, Code};
use crate::utils::SourcePosition;

pub type ParseResult<T> = Result<T, ParseError>;

fn ordinal(n: &usize) -> String {
    let n = *n;
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    // Value grammar
    #[error("expected a number")]
    InvalidNumber { offset: usize },

    #[error("expected an integer")]
    InvalidInteger { offset: usize },

    #[error("expected a boolean (true, True, false or False)")]
    InvalidBoolean { offset: usize },

    #[error("angle must have either 'deg' or 'rad' as suffix")]
    MissingAngleUnit { offset: usize },

    #[error("string must begin with single or double quotation")]
    MissingStringDelimiter { offset: usize },

    #[error("string is missing its end quotation")]
    UnterminatedString { offset: usize },

    #[error("{tuple} tuple must begin with parenthesis")]
    TupleOpen { tuple: &'static str, offset: usize },

    #[error("{} tuple component must be {expected}", ordinal(.index))]
    TupleComponent {
        index: usize,
        expected: &'static str,
        offset: usize,
    },

    #[error("tuple components must be separated by ','")]
    TupleSeparator { offset: usize },

    #[error("{tuple} tuple must end with parenthesis")]
    TupleClose { tuple: &'static str, offset: usize },

    // Argument lists
    #[error("argument list must begin with '('")]
    ExpectedListOpen { offset: usize },

    #[error("arguments must be separated by ','")]
    MissingArgumentSeparator { offset: usize },

    #[error("unexpected argument")]
    UnexpectedArgument { offset: usize },

    #[error("invalid parameter meta arguments")]
    InvalidMetadata { offset: usize },

    #[error("expected '=' between argument '{argument}' and its value")]
    MissingEquals { argument: String, offset: usize },

    #[error("string argument exceeded maximum length ({length} > {max})")]
    StringTooLong {
        length: usize,
        max: usize,
        offset: usize,
    },

    // Declarations
    #[error("invalid parameter type")]
    InvalidParameterType { offset: usize },

    #[error("missing parameter name")]
    MissingParameterName { offset: usize },

    #[error("file ends prematurely after this parameter")]
    PrematureEnd { offset: usize },

    #[error("parameter name is too long ({length} > {max} characters)")]
    ParameterNameTooLong {
        length: usize,
        max: usize,
        offset: usize,
    },

    #[error("exceeded maximum number of parameters in kernel ({max})")]
    TooManyParameters { max: usize, offset: usize },

    #[error("unexpected symbol after parameter declaration, expected ';'")]
    MissingTerminator { offset: usize },
}

impl ParseError {
    /// Byte offset the error is anchored to
    pub fn offset(&self) -> usize {
        match self {
            Self::InvalidNumber { offset }
            | Self::InvalidInteger { offset }
            | Self::InvalidBoolean { offset }
            | Self::MissingAngleUnit { offset }
            | Self::MissingStringDelimiter { offset }
            | Self::UnterminatedString { offset }
            | Self::TupleOpen { offset, .. }
            | Self::TupleComponent { offset, .. }
            | Self::TupleSeparator { offset }
            | Self::TupleClose { offset, .. }
            | Self::ExpectedListOpen { offset }
            | Self::MissingArgumentSeparator { offset }
            | Self::UnexpectedArgument { offset }
            | Self::InvalidMetadata { offset }
            | Self::MissingEquals { offset, .. }
            | Self::StringTooLong { offset, .. }
            | Self::InvalidParameterType { offset }
            | Self::MissingParameterName { offset }
            | Self::PrematureEnd { offset }
            | Self::ParameterNameTooLong { offset, .. }
            | Self::TooManyParameters { offset, .. }
            | Self::MissingTerminator { offset } => *offset,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::InvalidNumber { .. } => codes::lexical::INVALID_NUMBER,
            Self::InvalidInteger { .. } => codes::lexical::INVALID_INTEGER,
            Self::InvalidBoolean { .. } => codes::lexical::INVALID_BOOLEAN,
            Self::MissingAngleUnit { .. } => codes::lexical::MISSING_ANGLE_UNIT,
            Self::MissingStringDelimiter { .. } => codes::lexical::MISSING_STRING_DELIMITER,
            Self::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            Self::TupleOpen { .. } => codes::syntax::TUPLE_OPEN,
            Self::TupleComponent { .. } => codes::syntax::TUPLE_COMPONENT,
            Self::TupleSeparator { .. } => codes::syntax::TUPLE_SEPARATOR,
            Self::TupleClose { .. } => codes::syntax::TUPLE_CLOSE,
            Self::ExpectedListOpen { .. } => codes::syntax::EXPECTED_LIST_OPEN,
            Self::MissingArgumentSeparator { .. } => codes::syntax::MISSING_ARGUMENT_SEPARATOR,
            Self::UnexpectedArgument { .. } => codes::syntax::UNEXPECTED_ARGUMENT,
            Self::InvalidMetadata { .. } => codes::syntax::INVALID_METADATA,
            Self::MissingEquals { .. } => codes::syntax::MISSING_EQUALS,
            Self::StringTooLong { .. } => codes::bounds::STRING_TOO_LONG,
            Self::InvalidParameterType { .. } => codes::syntax::INVALID_PARAMETER_TYPE,
            Self::MissingParameterName { .. } => codes::syntax::MISSING_PARAMETER_NAME,
            Self::PrematureEnd { .. } => codes::syntax::PREMATURE_END,
            Self::ParameterNameTooLong { .. } => codes::bounds::PARAMETER_NAME_TOO_LONG,
            Self::TooManyParameters { .. } => codes::bounds::TOO_MANY_PARAMETERS,
            Self::MissingTerminator { .. } => codes::syntax::MISSING_TERMINATOR,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get error category
    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    /// Resolve against the source text into a reportable diagnostic
    pub fn diagnostic(&self, source: &str, document: &str) -> Diagnostic {
        Diagnostic {
            document: document.to_string(),
            position: SourcePosition::resolve(source, self.offset()),
            code: self.error_code(),
            message: self.to_string(),
        }
    }
}
