//! Scopes describe the names that are visible to a syntax tree.
//!
//! A scope is owned and populated outside of this crate, and is only ever read
//! while checking.

use crate::syntax::ast::Type;
use std::collections::HashMap;

/// A variable that can be referenced from an interpolation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Type", into = "Type"))]
pub struct Variable {
    pub ty: Type,
}

impl From<Type> for Variable {
    fn from(ty: Type) -> Self {
        Self {
            ty,
        }
    }
}

impl From<Variable> for Type {
    fn from(variable: Variable) -> Self {
        variable.ty
    }
}

/// The signature of a function that can be called from an interpolation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    /// The types of each argument, in order.
    #[cfg_attr(feature = "serde", serde(rename = "args", default))]
    pub arg_types: Vec<Type>,

    /// The type of value the function returns.
    #[cfg_attr(feature = "serde", serde(rename = "returns"))]
    pub return_type: Type,
}

impl Function {
    pub fn new(arg_types: impl IntoIterator<Item = Type>, return_type: Type) -> Self {
        Self {
            arg_types: arg_types.into_iter().collect(),
            return_type,
        }
    }
}

/// Provides type information for variables and functions.
pub trait Scope {
    /// Look up a variable by its full (possibly dotted) name.
    fn lookup_var(&self, name: &str) -> Option<Variable>;

    /// Look up a function by name.
    fn lookup_func(&self, name: &str) -> Option<Function>;
}

impl<S: Scope + ?Sized> Scope for &S {
    fn lookup_var(&self, name: &str) -> Option<Variable> {
        (**self).lookup_var(name)
    }

    fn lookup_func(&self, name: &str) -> Option<Function> {
        (**self).lookup_func(name)
    }
}

impl<S: Scope + ?Sized> Scope for Box<S> {
    fn lookup_var(&self, name: &str) -> Option<Variable> {
        (**self).lookup_var(name)
    }

    fn lookup_func(&self, name: &str) -> Option<Function> {
        (**self).lookup_func(name)
    }
}

/// A scope backed by plain maps.
///
/// With the `serde` feature a map scope can be loaded from configuration, where
/// variables map straight to their type name:
///
/// ```toml
/// [variables]
/// "var.region" = "string"
///
/// [functions.join]
/// args = ["string", "list"]
/// returns = "string"
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapScope {
    #[cfg_attr(feature = "serde", serde(default))]
    pub variables: HashMap<String, Variable>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub functions: HashMap<String, Function>,
}

impl MapScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a variable, replacing any previous definition with the same name.
    pub fn define_var(&mut self, name: impl Into<String>, ty: impl Into<Type>) {
        self.variables.insert(name.into(), Variable::from(ty.into()));
    }

    /// Define a function, replacing any previous definition with the same name.
    pub fn define_func(&mut self, name: impl Into<String>, function: Function) {
        self.functions.insert(name.into(), function);
    }

    pub fn with_var(mut self, name: impl Into<String>, ty: impl Into<Type>) -> Self {
        self.define_var(name, ty);
        self
    }

    pub fn with_func(mut self, name: impl Into<String>, arg_types: impl IntoIterator<Item = Type>, return_type: Type) -> Self {
        self.define_func(name, Function::new(arg_types, return_type));
        self
    }
}

impl Scope for MapScope {
    fn lookup_var(&self, name: &str) -> Option<Variable> {
        self.variables.get(name).cloned()
    }

    fn lookup_func(&self, name: &str) -> Option<Function> {
        self.functions.get(name).cloned()
    }
}
