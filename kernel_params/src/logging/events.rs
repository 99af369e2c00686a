//! Event system for parameter scanning logs

use super::codes::Code;
use crate::utils::SourcePosition;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub position: Option<SourcePosition>,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            position: None,
            context: BTreeMap::new(),
        }
    }

    /// Create a new error event
    pub fn error(error_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, error_code, message)
    }

    /// Create a new info event (info may not need codes)
    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, Code::new("I000"), message)
    }

    /// Create a success event (info with success code)
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, success_code, message)
    }

    /// Create a debug event
    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, Code::new("D000"), message)
    }

    /// Attach a resolved source position
    pub fn with_position(mut self, position: SourcePosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Add context data
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    /// Get severity from error code
    pub fn severity(&self) -> &'static str {
        super::codes::get_severity(self.code.as_str()).as_str()
    }

    /// Get error category
    pub fn category(&self) -> &'static str {
        super::codes::get_category(self.code.as_str())
    }

    /// Get error description
    pub fn description(&self) -> &'static str {
        super::codes::get_description(self.code.as_str())
    }

    /// Get recommended action
    pub fn recommended_action(&self) -> &'static str {
        super::codes::get_action(self.code.as_str())
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        super::codes::is_recoverable(self.code.as_str())
    }

    /// Format for display
    pub fn format(&self) -> String {
        let position_str = self
            .position
            .map(|p| format!(" at {}:{}", p.line, p.column))
            .unwrap_or_default();

        format!(
            "[{}] {} - {}{}",
            self.level.as_str(),
            self.code.as_str(),
            self.message,
            position_str
        )
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if self.is_error() {
            json["error_metadata"] = serde_json::json!({
                "recoverable": self.is_recoverable(),
                "description": self.description(),
                "recommended_action": self.recommended_action(),
            });
        }

        if let Some(position) = &self.position {
            json["position"] = serde_json::to_value(position)?;
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::to_value(&self.context)?;
        }

        serde_json::to_string(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_event_creation() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "File not found");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "E005");
        assert_eq!(event.message, "File not found");
        assert_eq!(event.category(), "FileProcessing");
    }

    #[test]
    fn test_success_event_creation() {
        let event = LogEvent::success(codes::success::PARAMETER_TABLE_COMPLETE, "Table built");

        assert!(event.is_info());
        assert_eq!(event.code.as_str(), "I041");
    }

    #[test]
    fn test_event_with_context() {
        let event = LogEvent::error(codes::bounds::TOO_MANY_PARAMETERS, "Too many")
            .with_context("count", "129")
            .with_context("limit", "128");

        assert_eq!(event.context.get("count"), Some(&"129".to_string()));
        assert_eq!(event.context.get("limit"), Some(&"128".to_string()));
    }

    #[test]
    fn test_event_formatting_with_position() {
        let event = LogEvent::error(codes::syntax::INVALID_PARAMETER_TYPE, "invalid type")
            .with_position(SourcePosition::new(8, 1, 9));
        let formatted = event.format();

        assert_eq!(formatted, "[ERROR] E050 - invalid type at 1:9");
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::syntax::MISSING_TERMINATOR, "expected ';'")
            .with_position(SourcePosition::new(20, 2, 5))
            .with_context("document", "blur.glsl");

        let json = event.format_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["level"], "ERROR");
        assert_eq!(value["code"], "E053");
        assert_eq!(value["position"]["line"], 2);
        assert_eq!(value["position"]["column"], 5);
        assert_eq!(value["context"]["document"], "blur.glsl");
    }
}
