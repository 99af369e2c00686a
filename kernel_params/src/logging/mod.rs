//! Global logging module for the kernel parameter parser
//!
//! Provides a thread-safe global logging service, a per-thread document
//! context that tags every event with the kernel being scanned, and a
//! macro interface for coded events.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::utils::SourcePosition;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, MultiLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Document currently being processed on this thread
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub name: String,
    pub events_logged: usize,
}

impl DocumentContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events_logged: 0,
        }
    }
}

thread_local! {
    static DOCUMENT_CONTEXT: RefCell<Option<DocumentContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with custom service (primarily for testing and embedding)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// DOCUMENT CONTEXT MANAGEMENT
// ============================================================================

/// Set document context for current thread
pub fn set_document_context(name: &str) {
    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(DocumentContext::new(name));
    });
}

/// Clear document context for current thread
pub fn clear_document_context() {
    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with document context, restoring the previous context after
pub fn with_document_context<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = DOCUMENT_CONTEXT.with(|ctx| ctx.borrow_mut().replace(DocumentContext::new(name)));
    let result = f();
    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

/// Get current document context (used by macros)
pub fn get_current_document_context() -> Option<DocumentContext> {
    DOCUMENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Count an event against the per-document budget; false once exhausted
fn admit_document_event() -> bool {
    DOCUMENT_CONTEXT.with(|ctx| match ctx.borrow_mut().as_mut() {
        Some(doc) => {
            if doc.events_logged >= config::get_max_log_events_per_document() {
                false
            } else {
                doc.events_logged += 1;
                true
            }
        }
        None => true,
    })
}

fn attach_document(event: LogEvent) -> LogEvent {
    if !config::include_document_context() {
        return event;
    }
    match get_current_document_context() {
        Some(doc) => event.with_context("document", &doc.name),
        None => event,
    }
}

fn dispatch(event: LogEvent) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if !logger.should_log(event.level) || !admit_document_event() {
        return;
    }
    logger.log_event(attach_document(event));
}

fn build_event(
    mut event: LogEvent,
    position: Option<SourcePosition>,
    context: Vec<(&str, &str)>,
) -> LogEvent {
    if let Some(p) = position {
        event = event.with_position(p);
    }
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    event
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    position: Option<SourcePosition>,
    context: Vec<(&str, &str)>,
) {
    let event = LogEvent::error(code, config::clamp_message(message));
    dispatch(build_event(event, position, context));
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let event = LogEvent::success(code, config::clamp_message(message));
    dispatch(build_event(event, None, context));
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let event = LogEvent::info(config::clamp_message(message));
    dispatch(build_event(event, None, context));
}

/// Log debug with context (used by log_debug! macro)
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    let event = LogEvent::debug(config::clamp_message(message));
    dispatch(build_event(event, None, context));
}

/// Safe error logging; falls back to stderr if logging is uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

// ============================================================================
// TEST SUPPORT
// ============================================================================

/// Shared in-memory sink installed as the global logger for unit tests.
///
/// Tests running in parallel share it, so assertions should filter by a
/// unique document name via [`MemoryLogger::get_events_for_document`].
#[cfg(test)]
pub(crate) fn test_memory_logger() -> Arc<MemoryLogger> {
    static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
    MEMORY
        .get_or_init(|| {
            let memory = service::create_test_logger();
            let service = LoggingService::new(memory.clone(), LogLevel::Debug);
            // Only this helper installs a global logger under cfg(test)
            let _ = init_global_logging_with_service(Arc::new(service));
            memory
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_context_management() {
        clear_document_context();
        assert!(get_current_document_context().is_none());

        set_document_context("blur.glsl");
        let context = get_current_document_context();
        assert_eq!(context.map(|c| c.name), Some("blur.glsl".to_string()));

        clear_document_context();
        assert!(get_current_document_context().is_none());
    }

    #[test]
    fn test_with_document_context_restores_previous() {
        set_document_context("outer.glsl");

        let result = with_document_context("inner.glsl", || {
            let context = get_current_document_context();
            assert_eq!(context.map(|c| c.name), Some("inner.glsl".to_string()));
            42
        });

        assert_eq!(result, 42);
        let restored = get_current_document_context();
        assert_eq!(restored.map(|c| c.name), Some("outer.glsl".to_string()));
        clear_document_context();
    }

    #[test]
    fn test_events_tagged_with_document() {
        let memory = test_memory_logger();

        with_document_context("tagged-event.glsl", || {
            log_error_with_context(
                codes::syntax::MISSING_TERMINATOR,
                "expected ';'",
                Some(SourcePosition::new(3, 1, 4)),
                vec![("offset", "3")],
            );
        });

        let events = memory.get_events_for_document("tagged-event.glsl");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, codes::syntax::MISSING_TERMINATOR);
        assert_eq!(events[0].position, Some(SourcePosition::new(3, 1, 4)));
        assert_eq!(events[0].context.get("offset").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_per_document_event_budget() {
        let memory = test_memory_logger();
        let budget = config::get_max_log_events_per_document();

        with_document_context("budget.glsl", || {
            for _ in 0..budget + 5 {
                log_info_with_context("tick", vec![]);
            }
        });

        assert_eq!(memory.get_events_for_document("budget.glsl").len(), budget);
    }

    #[test]
    fn test_safe_logging() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }
}
