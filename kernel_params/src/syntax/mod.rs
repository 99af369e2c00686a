//! Value grammar, argument lists and parse errors
//!
//! Everything here operates on a [`Cursor`](crate::lexical::Cursor) and
//! reports failures as [`ParseError`] values anchored at a byte offset.

pub mod args;
pub mod diagnostic;
pub mod error;
pub mod values;

pub use args::{parse_argument, parse_string_argument, ArgumentList, ListState};
pub use diagnostic::Diagnostic;
pub use error::{ParseError, ParseResult};
