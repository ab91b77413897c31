//! Expression syntax tree with exact source spans

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous region of source text, as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// Length in bytes
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// End offset (exclusive)
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Span covering both `a` and `b`. `a` must start at or before `b`.
    pub fn cover(a: Span, b: Span) -> Span {
        Span::new(a.start, b.end() - a.start)
    }

    /// Whether `other` lies entirely within this span.
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// Structural category of a syntax node, used as the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A call expression, e.g. `send(x)` or `bot.send(x)`
    MethodCall,
    /// A member access, e.g. `message.Chat`
    MemberAccess,
    /// A bare identifier
    Identifier,
    /// An integer or string literal
    Literal,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::MethodCall => write!(f, "method-call"),
            NodeKind::MemberAccess => write!(f, "member-access"),
            NodeKind::Identifier => write!(f, "identifier"),
            NodeKind::Literal => write!(f, "literal"),
        }
    }
}

/// A call expression: callee followed by a parenthesized argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

impl CallExpr {
    /// Name of the invoked method: the callee identifier, or the accessed
    /// member when the callee is a member access (`bot.send(..)` -> "send").
    pub fn method_name(&self) -> Option<&str> {
        match self.callee.as_ref() {
            Expr::Ident(ident) => Some(&ident.name),
            Expr::Member(member) => Some(&member.member),
            _ => None,
        }
    }
}

/// A member access: `base.Member`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub base: Box<Expr>,
    /// The accessed member name
    pub member: String,
    /// Span of the member name alone
    pub member_span: Span,
    pub span: Span,
}

/// A bare identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentExpr {
    pub name: String,
    pub span: Span,
}

/// An integer or string literal. The raw source text is kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub text: String,
    pub span: Span,
}

/// An immutable node in the parsed tree. The tree owns all nodes; children's
/// spans are disjoint and nested within the parent's span.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Call(CallExpr),
    Member(MemberExpr),
    Ident(IdentExpr),
    Literal(LiteralExpr),
}

impl Expr {
    /// Structural category of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Call(_) => NodeKind::MethodCall,
            Expr::Member(_) => NodeKind::MemberAccess,
            Expr::Ident(_) => NodeKind::Identifier,
            Expr::Literal(_) => NodeKind::Literal,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Call(call) => call.span,
            Expr::Member(member) => member.span,
            Expr::Ident(ident) => ident.span,
            Expr::Literal(literal) => literal.span,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Call(call) => {
                let mut children = Vec::with_capacity(call.args.len() + 1);
                children.push(call.callee.as_ref());
                children.extend(call.args.iter());
                children
            }
            Expr::Member(member) => vec![member.base.as_ref()],
            Expr::Ident(_) | Expr::Literal(_) => Vec::new(),
        }
    }

    pub fn as_call(&self) -> Option<&CallExpr> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_member(&self) -> Option<&MemberExpr> {
        match self {
            Expr::Member(member) => Some(member),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<&IdentExpr> {
        match self {
            Expr::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

/// A parsed source file: the source text plus its expression statements.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    source: String,
    statements: Vec<Expr>,
}

impl SyntaxTree {
    /// Parse source text into a tree. See [`crate::parser`] for the grammar.
    pub fn parse(source: &str) -> Result<Self, crate::error::ParseError> {
        let statements = crate::parser::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            statements,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn statements(&self) -> &[Expr] {
        &self.statements
    }

    /// Source text covered by `span`.
    pub fn text(&self, span: Span) -> &str {
        &self.source[span.start..span.end()]
    }

    /// All nodes in pre-order: parent before children, siblings in source order.
    pub fn iter(&self) -> PreOrder<'_> {
        let mut stack: Vec<&Expr> = self.statements.iter().collect();
        stack.reverse();
        PreOrder { stack }
    }

    /// The node whose span equals `span` exactly, if any.
    pub fn node_at(&self, span: Span) -> Option<&Expr> {
        self.iter().find(|node| node.span() == span)
    }
}

/// Pre-order traversal over a [`SyntaxTree`].
pub struct PreOrder<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let mut children = node.children();
        children.reverse();
        self.stack.extend(children);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_cover() {
        let a = Span::new(5, 12);
        let b = Span::new(19, 17);
        let covered = Span::cover(a, b);
        assert_eq!(covered.start, 5);
        assert_eq!(covered.end(), 36);
    }

    #[test]
    fn test_span_contains() {
        let outer = Span::new(0, 20);
        assert!(outer.contains(Span::new(0, 20)));
        assert!(outer.contains(Span::new(5, 10)));
        assert!(!outer.contains(Span::new(15, 10)));
    }

    #[test]
    fn test_span_display() {
        assert_eq!(format!("{}", Span::new(3, 7)), "3..10");
    }

    #[test]
    fn test_method_name() {
        let tree = SyntaxTree::parse("send(1); bot.send(2)").unwrap();
        let calls: Vec<&CallExpr> = tree.iter().filter_map(Expr::as_call).collect();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method_name(), Some("send"));
        assert_eq!(calls[1].method_name(), Some("send"));
    }

    #[test]
    fn test_preorder_visits_parent_before_children() {
        let tree = SyntaxTree::parse("send(message.Chat, 1)").unwrap();
        let kinds: Vec<NodeKind> = tree.iter().map(Expr::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::MethodCall,
                NodeKind::Identifier,   // callee `send`
                NodeKind::MemberAccess, // `message.Chat`
                NodeKind::Identifier,   // `message`
                NodeKind::Literal,      // `1`
            ]
        );
    }

    #[test]
    fn test_child_spans_nested_in_parent() {
        let tree = SyntaxTree::parse("bot.edit(message.Chat.Id, \"x\")").unwrap();
        for node in tree.iter() {
            for child in node.children() {
                assert!(
                    node.span().contains(child.span()),
                    "child {} not inside parent {}",
                    child.span(),
                    node.span()
                );
            }
        }
    }

    #[test]
    fn test_node_at_exact_span() {
        let source = "send(message.Chat)";
        let tree = SyntaxTree::parse(source).unwrap();
        let member = tree
            .iter()
            .find_map(Expr::as_member)
            .map(|m| m.span)
            .unwrap();
        assert_eq!(tree.text(member), "message.Chat");
        assert!(tree.node_at(member).is_some());
        assert!(tree.node_at(Span::new(0, 1)).is_none());
    }
}
