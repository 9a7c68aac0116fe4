//! The core Interpol syntax implementation.
//!
//! Interpol source is plain text with `${...}` interpolations embedded in it.
//! The provided parser turns such text into a small abstract syntax tree of
//! literals, variable accesses, function calls and concatenations, which can
//! then be type checked and evaluated.

pub mod ast;
pub mod error;
pub mod lexer;
mod parser;
pub mod source;
pub mod tokens;

pub use parser::{parse, MAX_DEPTH};
