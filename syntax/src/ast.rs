//! Abstract syntax tree definitions for the language syntax.

use crate::source::Position;
use std::fmt;
use std::str::FromStr;

/// The type of a value.
///
/// The parser itself only ever produces strings, but a scope may describe variables and functions of any other type.
/// Types that are not known to this crate can be described using [`Type::Named`].
#[derive(Clone, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
#[non_exhaustive]
pub enum Type {
    String,
    Int,
    Float,
    Bool,
    List,
    Map,

    /// A type defined outside of this crate, identified by its name.
    Named(String),
}

impl Type {
    pub fn name(&self) -> &str {
        match self {
            Type::String => "string",
            Type::Int => "int",
            Type::Float => "float",
            Type::Bool => "bool",
            Type::List => "list",
            Type::Map => "map",
            Type::Named(name) => name,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Type {
    fn from(name: &str) -> Self {
        match name {
            "string" => Type::String,
            "int" => Type::Int,
            "float" => Type::Float,
            "bool" => Type::Bool,
            "list" => Type::List,
            "map" => Type::Map,
            name => Type::Named(name.to_owned()),
        }
    }
}

impl From<String> for Type {
    fn from(name: String) -> Self {
        match Type::from(name.as_str()) {
            Type::Named(_) => Type::Named(name),
            ty => ty,
        }
    }
}

impl From<Type> for String {
    fn from(ty: Type) -> Self {
        match ty {
            Type::Named(name) => name,
            ty => ty.name().to_owned(),
        }
    }
}

impl FromStr for Type {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Type::from(s))
    }
}

/// A node in the syntax tree.
///
/// Every node records the position in the source it was parsed from. Nodes are never modified after the parser has
/// built them.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// A literal value, such as a run of plain text.
    Literal {
        value: String,
        ty: Type,
        #[cfg_attr(feature = "serde", serde(skip))]
        pos: Position,
    },

    /// A reference to a variable, such as `${var.foo}`.
    ///
    /// The name is opaque to the parser; interpreting the dots is up to the scope.
    VariableAccess {
        name: String,
        #[cfg_attr(feature = "serde", serde(skip))]
        pos: Position,
    },

    /// A function call, such as `${join(a, b)}`.
    Call {
        func: String,
        args: Vec<Node>,
        #[cfg_attr(feature = "serde", serde(skip))]
        pos: Position,
    },

    /// Two or more fragments that are joined together into a single string.
    Concat {
        exprs: Vec<Node>,
        #[cfg_attr(feature = "serde", serde(skip))]
        pos: Position,
    },
}

impl Node {
    /// Create a string literal.
    pub fn literal(value: impl Into<String>, pos: Position) -> Self {
        Node::Literal {
            value: value.into(),
            ty: Type::String,
            pos,
        }
    }

    /// Join the given nodes into one.
    ///
    /// A single node is returned as-is, and no nodes at all produce an empty string literal at the given position.
    /// Otherwise the result is a [`Node::Concat`] positioned at its first child.
    pub fn concat(mut exprs: Vec<Node>, pos: Position) -> Self {
        match exprs.len() {
            0 => Node::literal("", pos),
            1 => exprs.remove(0),
            _ => Node::Concat {
                pos: exprs[0].pos(),
                exprs,
            },
        }
    }

    /// Get the position in the source this node was parsed from.
    pub fn pos(&self) -> Position {
        match self {
            Node::Literal { pos, .. }
            | Node::VariableAccess { pos, .. }
            | Node::Call { pos, .. }
            | Node::Concat { pos, .. } => *pos,
        }
    }

    /// Get the direct children of this node, in order.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Literal { .. } | Node::VariableAccess { .. } => &[],
            Node::Call { args, .. } => args,
            Node::Concat { exprs, .. } => exprs,
        }
    }

    /// Walk this node and all of its descendants in post-order.
    ///
    /// Children are visited left to right, depth first, and every node is passed to the visitor only after all of its
    /// children have been.
    pub fn accept<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Node),
    {
        for child in self.children() {
            child.accept(visitor);
        }

        visitor(self);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Literal { value, ty, .. } => write!(f, "Literal({:?}, {})", value, ty),
            Node::VariableAccess { name, .. } => write!(f, "VariableAccess({})", name),
            Node::Call { func, args, .. } => write!(f, "Call({}) ", func).and_then(|_|
                f.debug_list().entries(args).finish()),
            Node::Concat { exprs, .. } => write!(f, "Concat ").and_then(|_|
                f.debug_list().entries(exprs).finish()),
        }
    }
}
