// RUNTIME PREFERENCES (User Experience)
//
// Hard limits are compile-time constants (see `compile_time`). Everything in
// this file is a preference: it can be set through `KPARAMS_*` environment
// variables or a TOML file passed to the CLI with `--config`.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to log size/line metrics after loading a kernel file
    pub enable_performance_logging: bool,

    /// Whether an empty kernel file is rejected before parsing
    pub reject_empty_files: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
            reject_empty_files: env_flag(env_vars::REJECT_EMPTY_FILES, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerPreferences {
    /// Whether to emit a debug event for every accepted declaration
    pub log_declarations: bool,

    /// Whether to log the layout summary after a successful parse
    pub log_layout_summary: bool,
}

impl Default for ScannerPreferences {
    fn default() -> Self {
        Self {
            log_declarations: env_flag(env_vars::SCANNER_LOG_DECLARATIONS, false),
            log_layout_summary: env_flag(env_vars::SCANNER_LOG_LAYOUT_SUMMARY, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output for non-error events
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,

    /// Whether to attach the document name to every event
    pub include_document_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_document_context: env_flag(env_vars::LOGGING_INCLUDE_DOCUMENT_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Errors raised while loading a preferences file
#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Failed to read preferences file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid preferences TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub scanner: ScannerPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML text; missing tables fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, RuntimeConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load preferences from a TOML file on disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RuntimeConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RuntimeConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "KPARAMS_ENABLE_PERFORMANCE_LOGGING";
    pub const REJECT_EMPTY_FILES: &str = "KPARAMS_REJECT_EMPTY_FILES";

    // Scanner
    pub const SCANNER_LOG_DECLARATIONS: &str = "KPARAMS_SCANNER_LOG_DECLARATIONS";
    pub const SCANNER_LOG_LAYOUT_SUMMARY: &str = "KPARAMS_SCANNER_LOG_LAYOUT_SUMMARY";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "KPARAMS_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "KPARAMS_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "KPARAMS_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_DOCUMENT_CONTEXT: &str = "KPARAMS_LOGGING_INCLUDE_DOCUMENT_CONTEXT";
}
