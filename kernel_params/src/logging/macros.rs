//! Type-safe logging macros using Code types with Display support
//!
//! Context values may be any `Display` type; they are formatted before the
//! event is built.

// ============================================================================
// ERROR LOGGING
// ============================================================================

/// Log error with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, position = $position:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($position), vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, None, context_refs)
        }
    };

    ($code:expr, $message:expr, position = $position:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, Some($position), context_refs)
        }
    };
}

// ============================================================================
// SUCCESS LOGGING
// ============================================================================

/// Log success with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

// ============================================================================
// INFO AND DEBUG LOGGING
// ============================================================================

/// Log informational message - accepts Display types for context values
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

/// Log debug message; context is only formatted when debug is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::log_debug_with_context($message, vec![])
        }
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_debug_with_context($message, context_refs)
        }
    };
}

// ============================================================================
// CONVENIENCE MACROS
// ============================================================================

/// Log a success event carrying an elapsed duration in milliseconds
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr) => {
        $crate::log_success!($code, $message,
            "duration_ms" => $duration.as_secs_f64() * 1000.0
        )
    };

    ($code:expr, $message:expr, duration = $duration:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::log_success!($code, $message,
            "duration_ms" => $duration.as_secs_f64() * 1000.0,
            $($key => $value),+
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::{self, codes};
    use crate::utils::SourcePosition;

    #[test]
    fn test_macros_attach_context() {
        let memory = logging::test_memory_logger();

        logging::with_document_context("macro-test.glsl", || {
            log_error!(codes::lexical::INVALID_NUMBER, "expected a number",
                position = SourcePosition::new(5, 1, 6),
                "offset" => 5usize,
                "expected" => "float"
            );
            log_success!(codes::success::PARAMETER_TABLE_COMPLETE, "done",
                "params" => 3
            );
            log_info!("scanning", "bytes" => 120);
            log_performance!(codes::success::FILE_PROCESSING_SUCCESS, "loaded",
                duration = std::time::Duration::from_millis(2),
                "lines" => 10
            );
        });

        let events = memory.get_events_for_document("macro-test.glsl");
        assert_eq!(events.len(), 4);

        assert!(events[0].is_error());
        assert_eq!(events[0].position, Some(SourcePosition::new(5, 1, 6)));
        assert_eq!(events[0].context.get("expected").map(String::as_str), Some("float"));
        assert_eq!(events[1].context.get("params").map(String::as_str), Some("3"));
        assert_eq!(events[2].context.get("bytes").map(String::as_str), Some("120"));
        assert!(events[3].context.contains_key("duration_ms"));
    }
}
