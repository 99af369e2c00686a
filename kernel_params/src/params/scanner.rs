//! Document scanner and parameter table builder
//!
//! Walks a kernel source left to right, ignoring everything except
//! `uniform` declarations. The first malformed declaration aborts the scan.

use super::declaration::parse_declaration;
use super::descriptor::ParameterTable;
use crate::config::runtime::ScannerPreferences;
use crate::lexical::Cursor;
use crate::logging::{self, codes};
use crate::syntax::{Diagnostic, ParseResult};
use crate::{log_error, log_success};

const UNIFORM_KEYWORD: &str = "uniform";

/// Scans kernel sources into parameter tables
#[derive(Debug, Clone, Default)]
pub struct ParamScanner {
    preferences: ScannerPreferences,
}

impl ParamScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: ScannerPreferences) -> Self {
        Self { preferences }
    }

    /// Build the parameter table without reporting anything.
    pub fn scan(&self, source: &str) -> ParseResult<ParameterTable> {
        let mut cursor = Cursor::new(source);
        let mut table = ParameterTable::new();

        while cursor.advance_to_identifier() {
            if !cursor.match_keyword(UNIFORM_KEYWORD) {
                cursor.take_alpha();
                continue;
            }

            let descriptor = parse_declaration(&mut cursor, &table)?;
            if self.preferences.log_declarations {
                log_success!(codes::success::PARAMETER_DECLARED, "Parameter declared",
                    "name" => &descriptor.name,
                    "type" => descriptor.param_type,
                    "offset" => descriptor.std140_offset,
                    "size" => descriptor.std140_size
                );
            }
            table.push(descriptor);
        }

        Ok(table)
    }

    /// Build the parameter table for a named document.
    ///
    /// On failure exactly one error event is logged, carrying the same text
    /// as the returned diagnostic. Callers should not report it again.
    pub fn parse(&self, source: &str, document: &str) -> Result<ParameterTable, Diagnostic> {
        logging::with_document_context(document, || match self.scan(source) {
            Ok(table) => {
                if self.preferences.log_layout_summary {
                    log_success!(codes::success::PARAMETER_TABLE_COMPLETE, "Parameter table complete",
                        "params" => table.len(),
                        "samplers" => table.sampler_count(),
                        "buffer_slots" => table.buffer_slots()
                    );
                }
                Ok(table)
            }
            Err(error) => {
                let diagnostic = error.diagnostic(source, document);
                log_error!(diagnostic.code, &diagnostic.to_string(),
                    position = diagnostic.position,
                    "line" => diagnostic.line(),
                    "column" => diagnostic.column(),
                    "offset" => diagnostic.offset()
                );
                Err(diagnostic)
            }
        })
    }
}

/// Scan `source` with default preferences, without logging
pub fn scan_parameters(source: &str) -> ParseResult<ParameterTable> {
    ParamScanner::new().scan(source)
}

/// Parse a named kernel document, reporting a single diagnostic on failure
pub fn parse_kernel(source: &str, document: &str) -> Result<ParameterTable, Diagnostic> {
    ParamScanner::new().parse(source, document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamType;
    use crate::syntax::ParseError;
    use assert_matches::assert_matches;

    #[test]
    fn test_ignores_non_declarations() {
        let source = "
            // uniform float commented;
            /* uniform vec2 hidden; */
            uniform float speed;
            void main() { float uniformity = 1.0; vec3 c = vec3(0); }
            uniform vec3 color;
        ";
        let table = scan_parameters(source).unwrap();
        let names: Vec<_> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["speed", "color"]);
    }

    #[test]
    fn test_keyword_must_stand_alone() {
        let table = scan_parameters("uniforms float a; xuniform float b;").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_intensity_is_not_int() {
        assert_matches!(
            scan_parameters("uniform intensity x;"),
            Err(ParseError::InvalidParameterType { offset: 8 })
        );
        let table = scan_parameters("uniform float intensity;").unwrap();
        assert_eq!(table.get(0).map(|p| p.name.as_str()), Some("intensity"));
    }

    #[test]
    fn test_tex_units_follow_sampler_order() {
        let source = "uniform sampler2D a; uniform float f; uniform sampler1D b;
                      uniform vec4 v; uniform sampler2D c;";
        let table = scan_parameters(source).unwrap();
        let units: Vec<_> = table
            .iter()
            .filter(|p| p.param_type.is_sampler())
            .map(|p| p.assigned_tex_unit)
            .collect();
        assert_eq!(units, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(table.sampler_count(), 3);
        assert_eq!(table.find("v").map(|p| p.std140_offset), Some(4));
    }

    #[test]
    fn test_first_failure_aborts() {
        assert_matches!(
            scan_parameters("uniform float a; uniform float b(; uniform float c;"),
            Err(ParseError::UnexpectedArgument { offset: 33 })
        );
    }

    #[test]
    fn test_empty_and_comment_only_sources() {
        assert!(scan_parameters("").unwrap().is_empty());
        assert!(scan_parameters("// nothing\n/* here */").unwrap().is_empty());
        assert!(scan_parameters("/* unterminated uniform float a;").unwrap().is_empty());
    }

    #[test]
    fn test_parse_logs_exactly_one_diagnostic() {
        let memory = logging::test_memory_logger();
        let document = "scanner-one-diagnostic.glsl";

        let diagnostic = parse_kernel("uniform float a;\nuniform foo bad;", document).unwrap_err();
        assert_eq!(diagnostic.line(), 2);
        assert_eq!(diagnostic.column(), 9);

        let errors: Vec<_> = memory
            .get_events_for_document(document)
            .into_iter()
            .filter(|e| e.is_error())
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, diagnostic.to_string());
        assert_eq!(errors[0].code, codes::syntax::INVALID_PARAMETER_TYPE);
        assert_eq!(errors[0].context.get("line").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_parse_logs_summary_on_success() {
        let memory = logging::test_memory_logger();
        let document = "scanner-summary.glsl";
        let scanner = ParamScanner::with_preferences(ScannerPreferences {
            log_declarations: true,
            log_layout_summary: true,
        });

        let table = scanner.parse("uniform vec2 p; uniform sampler2D t;", document).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).map(|p| p.param_type), Some(ParamType::Vec2));

        let events = memory.get_events_for_document(document);
        assert!(events.iter().all(|e| !e.is_error()));
        let summary = events
            .iter()
            .find(|e| e.code == codes::success::PARAMETER_TABLE_COMPLETE)
            .expect("summary event");
        assert_eq!(summary.context.get("params").map(String::as_str), Some("2"));
        assert_eq!(summary.context.get("buffer_slots").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_declarations_logged_with_code() {
        let memory = logging::test_memory_logger();
        let document = "scanner-declarations.glsl";
        let scanner = ParamScanner::with_preferences(ScannerPreferences {
            log_declarations: true,
            log_layout_summary: false,
        });

        scanner.parse("uniform float a; uniform vec3 b;", document).unwrap();

        let declared: Vec<_> = memory
            .get_events_for_document(document)
            .into_iter()
            .filter(|e| e.code == codes::success::PARAMETER_DECLARED)
            .collect();
        assert_eq!(declared.len(), 2);
        assert_eq!(declared[1].context.get("name").map(String::as_str), Some("b"));
        assert_eq!(declared[1].context.get("offset").map(String::as_str), Some("4"));
    }
}
