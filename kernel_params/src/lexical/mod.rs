//! Lexical primitives for kernel source scanning
//!
//! Kernels are not tokenized up front. The declaration parser drives a
//! [`Cursor`] directly and only ever looks at the handful of characters it
//! needs, which keeps shader bodies (never parsed) from costing anything.

pub mod cursor;

pub use cursor::{is_alpha, is_blank, Cursor};
