//! Configuration module for logging
//!
//! Buffer sizes and message caps are compile-time constants; level, output
//! format and context inclusion are runtime preferences that may be set once
//! per process.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Get minimum log level
pub fn get_min_log_level() -> EventsLogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Check if the document name should be attached to events
pub fn include_document_context() -> bool {
    get_runtime_preferences().include_document_context
}

/// Get in-memory event buffer size
pub fn get_event_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Get maximum log events recorded per document
pub fn get_max_log_events_per_document() -> usize {
    MAX_LOG_EVENTS_PER_DOCUMENT
}

/// Get maximum log message length
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Truncate a message to the configured maximum length on a char boundary
pub fn clamp_message(message: &str) -> &str {
    let max = get_max_log_message_length();
    if message.len() <= max {
        return message;
    }
    let mut end = max;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    &message[..end]
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE == 0 {
        return Err("Log buffer size cannot be zero".to_string());
    }

    if MAX_LOG_EVENTS_PER_DOCUMENT > LOG_BUFFER_SIZE {
        return Err("Max log events per document exceeds total buffer size".to_string());
    }

    if MAX_LOG_MESSAGE_LENGTH < 80 {
        return Err(format!(
            "Max log message length too small for diagnostics: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         === Limits (Compile-time, {}) ===\n\
         - Log buffer size: {}\n\
         - Max events per document: {}\n\
         - Max message length: {}\n\
         === Preferences (Runtime) ===\n\
         - Min log level: {}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Include document context: {}",
        crate::config::build_info::profile(),
        LOG_BUFFER_SIZE,
        MAX_LOG_EVENTS_PER_DOCUMENT,
        MAX_LOG_MESSAGE_LENGTH,
        preferences.min_log_level.as_str(),
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.include_document_context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_clamp_message_short_is_unchanged() {
        assert_eq!(clamp_message("short message"), "short message");
    }

    #[test]
    fn test_clamp_message_respects_char_boundary() {
        let long = "é".repeat(get_max_log_message_length());
        let clamped = clamp_message(&long);
        assert!(clamped.len() <= get_max_log_message_length());
        assert!(clamped.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_config_summary_lists_limits() {
        let summary = get_config_summary();
        assert!(summary.contains("Log buffer size"));
        assert!(summary.contains("Include document context"));
    }
}
