//! Parenthesized `name=value` argument lists
//!
//! The list state lives in an [`ArgumentList`] owned by the caller's stack
//! frame, so nested or sibling lists never share flags.

use super::error::{ParseError, ParseResult};
use super::values::parse_string;
use crate::lexical::Cursor;

/// Progress through one argument list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Open { is_first: bool, has_error: bool },
    Closed,
}

#[derive(Debug)]
pub struct ArgumentList {
    state: ListState,
}

impl ArgumentList {
    /// Consume the opening `(`
    pub fn begin(cursor: &mut Cursor<'_>) -> ParseResult<Self> {
        if !cursor.eat_char(b'(') {
            return Err(ParseError::ExpectedListOpen {
                offset: cursor.offset(),
            });
        }
        Ok(Self {
            state: ListState::Open {
                is_first: true,
                has_error: false,
            },
        })
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    /// Advance to the next element.
    ///
    /// Returns `Ok(false)` once the closing `)` has been consumed. A list
    /// with an unrecognized element fails here at that element's position.
    pub fn next(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<bool> {
        let ListState::Open {
            is_first,
            has_error,
        } = self.state
        else {
            return Ok(false);
        };

        if has_error {
            return Err(ParseError::UnexpectedArgument {
                offset: cursor.offset(),
            });
        }

        cursor.skip_blank();
        if cursor.eat_char(b')') {
            self.state = ListState::Closed;
            return Ok(false);
        }

        if !is_first && !cursor.eat_char(b',') {
            return Err(ParseError::MissingArgumentSeparator {
                offset: cursor.offset(),
            });
        }
        cursor.skip_blank();

        self.state = ListState::Open {
            is_first: false,
            has_error,
        };
        Ok(true)
    }

    /// Flag the current element as unrecognized
    pub fn mark_unexpected(&mut self) {
        if let ListState::Open { is_first, .. } = self.state {
            self.state = ListState::Open {
                is_first,
                has_error: true,
            };
        }
    }

    /// Finish the list; fails if any element was flagged
    pub fn end(self, cursor: &Cursor<'_>) -> ParseResult<()> {
        match self.state {
            ListState::Open {
                has_error: true, ..
            } => Err(ParseError::InvalidMetadata {
                offset: cursor.offset(),
            }),
            _ => Ok(()),
        }
    }
}

/// Parse `name = value` if the next identifier is exactly `name`.
///
/// Returns `Ok(None)` without consuming input when the name does not match.
/// Once the name matches, any failure is fatal.
pub fn parse_argument<'src, T>(
    cursor: &mut Cursor<'src>,
    name: &str,
    value: impl FnOnce(&mut Cursor<'src>) -> ParseResult<T>,
) -> ParseResult<Option<T>> {
    if !cursor.match_keyword(name) {
        return Ok(None);
    }

    cursor.skip_blank();
    if !cursor.eat_char(b'=') {
        return Err(ParseError::MissingEquals {
            argument: name.to_string(),
            offset: cursor.offset(),
        });
    }
    cursor.skip_blank();

    value(cursor).map(Some)
}

/// String-valued argument with an optional maximum length in bytes
pub fn parse_string_argument<'src>(
    cursor: &mut Cursor<'src>,
    name: &str,
    max_len: Option<usize>,
) -> ParseResult<Option<&'src str>> {
    parse_argument(cursor, name, |cursor| {
        let offset = cursor.offset();
        let value = parse_string(cursor)?;
        match max_len {
            Some(max) if value.len() > max => Err(ParseError::StringTooLong {
                length: value.len(),
                max,
                offset,
            }),
            _ => Ok(value),
        }
    })
}
