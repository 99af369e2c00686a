//! Source location tracking
//!
//! The parser only ever records byte offsets. Line and column are derived on
//! demand from the source text, so nothing positional is stored alongside
//! parsed data and re-scanning the same text always yields the same answer.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct SourcePosition {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based, counted in characters)
    pub column: u32,
}

impl SourcePosition {
    /// Create a new position
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Resolve a byte offset against the full source text.
    ///
    /// Offsets past the end are clamped to the end of input. An offset that
    /// falls inside a multi-byte character is attributed to that character.
    pub fn resolve(source: &str, offset: usize) -> Self {
        let bytes = source.as_bytes();
        let offset = offset.min(bytes.len());
        let before = &bytes[..offset];

        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
        // Count character starts, skipping UTF-8 continuation bytes
        let column = 1 + before[line_start..]
            .iter()
            .filter(|&&b| (b & 0xC0) != 0x80)
            .count();

        Self::new(offset, line as u32, column as u32)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A source map that tracks line starts for efficient position lookup
#[derive(Debug, Clone)]
pub struct SourceMap<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
}

impl<'src> SourceMap<'src> {
    /// Create a new source map from source text
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        for (offset, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Number of lines in the source (an empty source has one line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the line and column for a byte offset
    pub fn position_at(&self, offset: usize) -> SourcePosition {
        SourcePosition::resolve(self.source, offset)
    }

    /// Get a line of text by line number (1-based), without its line break
    pub fn get_line(&self, line_num: u32) -> Option<&'src str> {
        if line_num == 0 {
            return None;
        }

        let line_idx = (line_num - 1) as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = match self.line_starts.get(line_idx + 1) {
            Some(next) => next - 1,
            None => self.source.len(),
        };

        self.source
            .get(start..end)
            .map(|line| line.trim_end_matches('\r'))
    }

    /// Format an error message with the offending line and a caret under it
    pub fn format_error(&self, position: SourcePosition, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!("  --> {}:{}\n", position.line, position.column));
        result.push_str(&self.format_excerpt(position));

        result
    }

    /// Render only the offending line and caret
    pub fn format_excerpt(&self, position: SourcePosition) -> String {
        let mut result = String::new();

        if let Some(line) = self.get_line(position.line) {
            let line_num_str = position.line.to_string();
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!("{} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));
            result.push_str(&format!(
                "{} | {}^\n",
                padding,
                " ".repeat(position.column.saturating_sub(1) as usize)
            ));
        }

        result
    }
}
