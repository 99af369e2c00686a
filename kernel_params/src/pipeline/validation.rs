use crate::logging::codes::{self, Code};

/// Every code a parse or load failure can report
const FAILURE_CODES: &[Code] = &[
    codes::file_processing::FILE_NOT_FOUND,
    codes::file_processing::FILE_TOO_LARGE,
    codes::file_processing::EMPTY_FILE,
    codes::file_processing::PERMISSION_DENIED,
    codes::file_processing::INVALID_ENCODING,
    codes::file_processing::IO_ERROR,
    codes::file_processing::INVALID_PATH,
    codes::file_processing::TOO_MANY_LINES,
    codes::lexical::INVALID_NUMBER,
    codes::lexical::INVALID_INTEGER,
    codes::lexical::INVALID_BOOLEAN,
    codes::lexical::MISSING_ANGLE_UNIT,
    codes::lexical::MISSING_STRING_DELIMITER,
    codes::lexical::UNTERMINATED_STRING,
    codes::syntax::TUPLE_OPEN,
    codes::syntax::TUPLE_COMPONENT,
    codes::syntax::TUPLE_SEPARATOR,
    codes::syntax::TUPLE_CLOSE,
    codes::syntax::EXPECTED_LIST_OPEN,
    codes::syntax::MISSING_ARGUMENT_SEPARATOR,
    codes::syntax::UNEXPECTED_ARGUMENT,
    codes::syntax::INVALID_METADATA,
    codes::syntax::MISSING_EQUALS,
    codes::syntax::INVALID_PARAMETER_TYPE,
    codes::syntax::MISSING_PARAMETER_NAME,
    codes::syntax::PREMATURE_END,
    codes::syntax::MISSING_TERMINATOR,
    codes::bounds::PARAMETER_NAME_TOO_LONG,
    codes::bounds::TOO_MANY_PARAMETERS,
    codes::bounds::STRING_TOO_LONG,
];

/// Check that logging is configured and every failure code is registered
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating kernel pipeline configuration");

    crate::logging::config::validate_config()?;

    for code in FAILURE_CODES {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Kernel pipeline validation succeeded",
        "codes_checked" => FAILURE_CODES.len()
    );

    Ok(())
}
