//! Type checking of syntax trees.
//!
//! The checker walks the tree in post-order, so by the time a node is visited
//! the types of all of its children are already sitting on a value stack, in
//! order. Each visit pops the types of its children and pushes its own.
//!
//! All checking state lives in a visitor that is created for a single check,
//! so checks never share anything besides the scope and can run in parallel.

use crate::error::{TypeError, TypeErrorKind};
use crate::scope::Scope;
use crate::syntax::ast::{Node, Type};
use crate::syntax::source::Position;
use log::debug;

/// Check that a syntax tree is well-typed with respect to a scope.
///
/// Only the first type error found is reported.
pub fn check<S: Scope + ?Sized>(root: &Node, scope: &S) -> Result<(), TypeError> {
    resolve_type(root, scope).map(|_| ())
}

/// Check a syntax tree and return the type of value it evaluates to.
pub fn resolve_type<S: Scope + ?Sized>(root: &Node, scope: &S) -> Result<Type, TypeError> {
    let mut visitor = TypeVisitor {
        scope,
        stack: Vec::new(),
        error: None,
    };

    root.accept(&mut |node: &Node| visitor.visit(node));

    match visitor.finish() {
        Ok(ty) => {
            debug!("resolved type {} at {}", ty, root.pos());
            Ok(ty)
        },
        Err(e) => {
            debug!("type check failed: {}", e);
            Err(e)
        },
    }
}

/// A reusable type checker for a single scope.
///
/// The checker holds no state between checks, so a shared checker can be used
/// from many threads at once as long as its scope can.
#[derive(Clone, Debug, Default)]
pub struct TypeChecker<S> {
    scope: S,
}

impl<S: Scope> TypeChecker<S> {
    pub fn new(scope: S) -> Self {
        Self {
            scope,
        }
    }

    /// Get the scope names are resolved in.
    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn check(&self, root: &Node) -> Result<(), TypeError> {
        check(root, &self.scope)
    }

    pub fn resolve_type(&self, root: &Node) -> Result<Type, TypeError> {
        resolve_type(root, &self.scope)
    }
}

struct TypeVisitor<'s, S: ?Sized> {
    scope: &'s S,

    /// Types of the nodes visited so far whose parent has not been visited yet.
    stack: Vec<Type>,

    /// The first error found. Once set, all further visits do nothing.
    error: Option<TypeError>,
}

impl<'s, S: Scope + ?Sized> TypeVisitor<'s, S> {
    fn visit(&mut self, node: &Node) {
        if self.error.is_some() {
            return;
        }

        let result = match node {
            Node::Literal { ty, .. } => Ok(ty.clone()),
            Node::VariableAccess { name, pos } => self.visit_variable_access(name, *pos),
            Node::Call { func, args, pos } => self.visit_call(func, args.len(), *pos),
            Node::Concat { exprs, pos } => self.visit_concat(exprs.len(), *pos),
        };

        match result {
            Ok(ty) => self.stack.push(ty),
            Err(e) => self.error = Some(e),
        }
    }

    fn visit_variable_access(&mut self, name: &str, pos: Position) -> Result<Type, TypeError> {
        match self.scope.lookup_var(name) {
            Some(variable) => Ok(variable.ty),
            None => Err(TypeError::new(TypeErrorKind::UnknownVariable {
                name: name.to_owned(),
            }, pos)),
        }
    }

    fn visit_call(&mut self, func: &str, arg_count: usize, pos: Position) -> Result<Type, TypeError> {
        let args = self.pop(arg_count);

        let function = self.scope.lookup_func(func).ok_or_else(|| TypeError::new(TypeErrorKind::UnknownFunction {
            name: func.to_owned(),
        }, pos))?;

        if args.len() != function.arg_types.len() {
            return Err(TypeError::new(TypeErrorKind::ArgumentCount {
                func: func.to_owned(),
                expected: function.arg_types.len(),
                actual: args.len(),
            }, pos));
        }

        for (i, (expected, actual)) in function.arg_types.iter().zip(args).enumerate() {
            if *expected != actual {
                return Err(TypeError::new(TypeErrorKind::ArgumentType {
                    func: func.to_owned(),
                    index: i + 1,
                    expected: expected.clone(),
                    actual,
                }, pos));
            }
        }

        Ok(function.return_type)
    }

    fn visit_concat(&mut self, count: usize, pos: Position) -> Result<Type, TypeError> {
        for (i, ty) in self.pop(count).into_iter().enumerate() {
            if ty != Type::String {
                return Err(TypeError::new(TypeErrorKind::ConcatOperand {
                    index: i + 1,
                    actual: ty,
                }, pos));
            }
        }

        // Concatenation always results in a string.
        Ok(Type::String)
    }

    /// Pop the types of the last `count` visited nodes, in the order they were visited.
    fn pop(&mut self, count: usize) -> Vec<Type> {
        debug_assert!(self.stack.len() >= count);

        let at = self.stack.len().saturating_sub(count);
        self.stack.split_off(at)
    }

    fn finish(mut self) -> Result<Type, TypeError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        debug_assert_eq!(self.stack.len(), 1);

        Ok(self.stack.pop().expect("post-order visit leaves the root type on the stack"))
    }
}
