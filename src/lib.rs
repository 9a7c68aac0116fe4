//! Front end of the Interpol string interpolation language.
//!
//! Source text is parsed into a syntax tree by [`parse`], and the tree can then
//! be type checked against a [`Scope`](scope::Scope) describing the variables and
//! functions available to it, before being handed off for evaluation.

pub mod check;
pub mod error;
pub mod scope;

// Re-export syntax crate.
pub mod syntax {
    pub use interpol_syntax::*;
}

pub mod prelude {
    pub use crate::check::TypeChecker;
    pub use crate::error::TypeError;
    pub use crate::scope::{Function, MapScope, Scope, Variable};
    pub use crate::syntax::ast::{Node, Type};
    pub use crate::syntax::error::ParseError;
}

pub use crate::check::{check, resolve_type, TypeChecker};
pub use interpol_syntax::parse;
