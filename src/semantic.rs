//! Type resolution collaborator and node classification
//!
//! The engine never resolves types itself. Hosts supply a [`TypeResolver`];
//! rules consult it through the analysis context and treat an absent binding
//! as "no match".

use crate::syntax::{Expr, NodeKind};
use std::collections::HashMap;

/// Nominal type of the message object both rules gate on.
pub const MESSAGE_TYPE: &str = "Message";

/// External type-resolution collaborator. Implementations must be usable
/// concurrently across independent analyses.
pub trait TypeResolver: Send + Sync {
    /// Resolved nominal type name of the expression, if known.
    fn resolve_type(&self, expr: &Expr) -> Option<&str>;
}

/// Map-backed resolver binding identifier names to type names. Suitable for
/// hosts with a flat binding environment, and for tests.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    bindings: HashMap<String, String>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an identifier to a type name.
    pub fn bind(mut self, name: &str, type_name: &str) -> Self {
        self.bindings.insert(name.to_string(), type_name.to_string());
        self
    }
}

impl TypeResolver for TypeTable {
    fn resolve_type(&self, expr: &Expr) -> Option<&str> {
        match expr {
            Expr::Ident(ident) => self.bindings.get(&ident.name).map(String::as_str),
            _ => None,
        }
    }
}

/// Classifies tree nodes: structural category, plus static types via the
/// external resolver.
pub struct NodeClassifier<'a> {
    resolver: &'a dyn TypeResolver,
}

impl<'a> NodeClassifier<'a> {
    pub fn new(resolver: &'a dyn TypeResolver) -> Self {
        Self { resolver }
    }

    pub fn kind(&self, expr: &Expr) -> NodeKind {
        expr.kind()
    }

    pub fn type_of(&self, expr: &Expr) -> Option<&str> {
        self.resolver.resolve_type(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxTree;

    #[test]
    fn test_type_table_resolves_bound_identifier() {
        let table = TypeTable::new().bind("message", MESSAGE_TYPE);
        let tree = SyntaxTree::parse("message").unwrap();
        assert_eq!(
            table.resolve_type(&tree.statements()[0]),
            Some(MESSAGE_TYPE)
        );
    }

    #[test]
    fn test_type_table_unbound_is_absent() {
        let table = TypeTable::new();
        let tree = SyntaxTree::parse("stranger").unwrap();
        assert_eq!(table.resolve_type(&tree.statements()[0]), None);
    }

    #[test]
    fn test_type_table_ignores_non_identifiers() {
        let table = TypeTable::new().bind("message", MESSAGE_TYPE);
        let tree = SyntaxTree::parse("message.Chat").unwrap();
        assert_eq!(table.resolve_type(&tree.statements()[0]), None);
    }

    #[test]
    fn test_classifier_kind_and_type() {
        let table = TypeTable::new().bind("message", MESSAGE_TYPE);
        let classifier = NodeClassifier::new(&table);
        let tree = SyntaxTree::parse("send(message)").unwrap();
        let call = tree.statements()[0].as_call().unwrap();

        assert_eq!(classifier.kind(&tree.statements()[0]), NodeKind::MethodCall);
        assert_eq!(classifier.type_of(&call.args[0]), Some(MESSAGE_TYPE));
    }
}
