//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification
//! functions. Error types map themselves onto these codes through
//! `error_code()`, and the registry answers category/severity questions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Value-level lexical error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_NUMBER: Code = Code::new("E020");
    pub const INVALID_INTEGER: Code = Code::new("E021");
    pub const INVALID_BOOLEAN: Code = Code::new("E022");
    pub const MISSING_ANGLE_UNIT: Code = Code::new("E023");
    pub const MISSING_STRING_DELIMITER: Code = Code::new("E024");
    pub const UNTERMINATED_STRING: Code = Code::new("E025");
}

/// Structural syntax error codes
pub mod syntax {
    use super::Code;

    pub const TUPLE_OPEN: Code = Code::new("E040");
    pub const TUPLE_COMPONENT: Code = Code::new("E041");
    pub const TUPLE_SEPARATOR: Code = Code::new("E042");
    pub const TUPLE_CLOSE: Code = Code::new("E043");
    pub const EXPECTED_LIST_OPEN: Code = Code::new("E044");
    pub const MISSING_ARGUMENT_SEPARATOR: Code = Code::new("E045");
    pub const UNEXPECTED_ARGUMENT: Code = Code::new("E046");
    pub const INVALID_METADATA: Code = Code::new("E047");
    pub const MISSING_EQUALS: Code = Code::new("E048");
    pub const INVALID_PARAMETER_TYPE: Code = Code::new("E050");
    pub const MISSING_PARAMETER_NAME: Code = Code::new("E051");
    pub const PREMATURE_END: Code = Code::new("E052");
    pub const MISSING_TERMINATOR: Code = Code::new("E053");
}

/// Capacity and length bound error codes
pub mod bounds {
    use super::Code;

    pub const PARAMETER_NAME_TOO_LONG: Code = Code::new("E060");
    pub const TOO_MANY_PARAMETERS: Code = Code::new("E061");
    pub const STRING_TOO_LONG: Code = Code::new("E062");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");

    // Parameter scanning
    pub const PARAMETER_DECLARED: Code = Code::new("I040");
    pub const PARAMETER_TABLE_COMPLETE: Code = Code::new("I041");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// (code, category, severity, recoverable, description, recommended action)
type MetadataRow = (
    &'static str,
    &'static str,
    Severity,
    bool,
    &'static str,
    &'static str,
);

#[rustfmt::skip]
const METADATA_TABLE: &[MetadataRow] = &[
    // System
    ("ERR001", "System", Severity::Critical, false,
        "Critical internal error", "File a bug report with the failing input"),
    ("ERR002", "System", Severity::Critical, false,
        "Initialization failure", "Check logging and runtime configuration"),
    ("ERR003", "System", Severity::High, false,
        "Runtime configuration could not be loaded", "Check the configuration file path and TOML syntax"),
    // File processing
    ("E005", "FileProcessing", Severity::Medium, false,
        "Kernel file not found", "Verify the file path exists"),
    ("E007", "FileProcessing", Severity::High, false,
        "Kernel file exceeds maximum size", "Reduce the kernel source size"),
    ("E008", "FileProcessing", Severity::Low, true,
        "Kernel file is empty", "Provide a kernel with content"),
    ("E009", "FileProcessing", Severity::Medium, false,
        "Permission denied reading kernel file", "Check file permissions"),
    ("E010", "FileProcessing", Severity::Medium, false,
        "Kernel file is not valid UTF-8", "Save the kernel with UTF-8 encoding"),
    ("E011", "FileProcessing", Severity::Medium, false,
        "I/O error while reading kernel file", "Check disk and file system state"),
    ("E012", "FileProcessing", Severity::Medium, false,
        "Invalid kernel file path", "Provide a path to a regular file"),
    ("E013", "FileProcessing", Severity::High, false,
        "Kernel file has too many lines", "Split or shorten the kernel source"),
    // Lexical
    ("E020", "Lexical", Severity::Medium, false,
        "Expected a numeric literal", "Write the value as a decimal number"),
    ("E021", "Lexical", Severity::Medium, false,
        "Expected an integer literal", "Write the value as a decimal integer"),
    ("E022", "Lexical", Severity::Medium, false,
        "Expected a boolean literal", "Use true, True, false or False"),
    ("E023", "Lexical", Severity::Medium, false,
        "Angle is missing its unit", "Suffix the angle with deg or rad"),
    ("E024", "Lexical", Severity::Medium, false,
        "String must begin with a quote", "Enclose the value in ' or \" quotes"),
    ("E025", "Lexical", Severity::Medium, false,
        "String is not terminated", "Close the string with its opening quote"),
    // Syntax
    ("E040", "Syntax", Severity::Medium, false,
        "Tuple must begin with a parenthesis", "Enclose tuple components in ( )"),
    ("E041", "Syntax", Severity::Medium, false,
        "Tuple component has the wrong form", "Check each tuple component's type"),
    ("E042", "Syntax", Severity::Medium, false,
        "Tuple components must be separated by ','", "Insert ',' between components"),
    ("E043", "Syntax", Severity::Medium, false,
        "Tuple must end with a parenthesis", "Close the tuple with ')'"),
    ("E044", "Syntax", Severity::Medium, false,
        "Argument list must begin with a parenthesis", "Open the metadata list with '('"),
    ("E045", "Syntax", Severity::Medium, false,
        "Arguments must be separated by ','", "Insert ',' between arguments"),
    ("E046", "Syntax", Severity::Medium, false,
        "Unexpected argument in list", "Remove the argument or fix its name"),
    ("E047", "Syntax", Severity::Medium, false,
        "Invalid parameter metadata", "Fix the earlier argument error"),
    ("E048", "Syntax", Severity::Medium, false,
        "Argument is missing '='", "Write arguments as name=value"),
    ("E050", "Syntax", Severity::Medium, false,
        "Unknown parameter type", "Use one of the supported uniform types"),
    ("E051", "Syntax", Severity::Medium, false,
        "Parameter name is missing", "Name the parameter after its type"),
    ("E052", "Syntax", Severity::Medium, false,
        "Source ends inside a parameter declaration", "Complete the declaration"),
    ("E053", "Syntax", Severity::Medium, false,
        "Parameter declaration is missing ';'", "Terminate the declaration with ';'"),
    // Bounds
    ("E060", "Bounds", Severity::Medium, false,
        "Parameter name is too long", "Shorten the parameter name"),
    ("E061", "Bounds", Severity::High, false,
        "Too many parameters in kernel", "Reduce the number of uniform parameters"),
    ("E062", "Bounds", Severity::Medium, false,
        "String argument is too long", "Shorten the string value"),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        METADATA_TABLE
            .iter()
            .map(
                |&(code, category, severity, recoverable, description, recommended_action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            description,
                            recommended_action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
