use crate::syntax::ast::Type;
use crate::syntax::source::Position;
use std::error::Error;
use std::fmt;

/// A type error discovered while checking a syntax tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeError {
    pub kind: TypeErrorKind,

    /// Position of the node the error was found at.
    pub pos: Position,
}

/// Types of type errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeErrorKind {
    /// A variable that the scope does not define.
    UnknownVariable { name: String },

    /// A function that the scope does not define.
    UnknownFunction { name: String },

    /// A concatenation operand that is not a string. The index begins at 1.
    ConcatOperand { index: usize, actual: Type },

    /// A function called with the wrong number of arguments.
    ArgumentCount { func: String, expected: usize, actual: usize },

    /// A function argument of the wrong type. The index begins at 1.
    ArgumentType { func: String, index: usize, expected: Type, actual: Type },
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, pos: Position) -> Self {
        Self {
            kind,
            pos,
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.kind)
    }
}

impl fmt::Display for TypeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeErrorKind::UnknownVariable { name } => write!(f, "unknown variable accessed: {}", name),
            TypeErrorKind::UnknownFunction { name } => write!(f, "unknown function called: {}", name),
            TypeErrorKind::ConcatOperand { index, actual } => {
                write!(f, "argument {} must be a string, got {}", index, actual)
            },
            TypeErrorKind::ArgumentCount { func, expected, actual } => {
                write!(f, "{}: expected {} arguments, got {}", func, expected, actual)
            },
            TypeErrorKind::ArgumentType { func, index, expected, actual } => {
                write!(f, "{}: argument {} should be {}, got {}", func, index, expected, actual)
            },
        }
    }
}

impl Error for TypeError {}
