//! Rule contract: descriptors, analysis context, and the `Rule` trait

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::FixError;
use crate::semantic::NodeClassifier;
use crate::syntax::{Expr, NodeKind, Span, SyntaxTree};
use serde::Serialize;

/// Immutable metadata for one rule. Created once at registry build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    /// Stable, globally unique identifier
    pub id: &'static str,
    /// Human-readable title
    pub title: &'static str,
    /// Message template with `{0}`-style positional placeholders
    pub message_template: &'static str,
    /// Category tag for grouping
    pub category: &'static str,
    /// Default severity
    pub severity: Severity,
    /// Whether the rule pairs its diagnostics with a transformation
    pub supports_fix: bool,
}

impl RuleDescriptor {
    /// Resolve the message template against positional arguments.
    pub fn format_message(&self, args: &[&str]) -> String {
        let mut message = self.message_template.to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), arg);
        }
        message
    }
}

/// A span replacement computed by a rule's fix.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEdit {
    /// Span to replace (exactly the diagnostic's span)
    pub span: Span,
    /// Replacement source text
    pub replacement: String,
}

/// Per-node analysis context handed to rules: the current node, a handle to
/// request type bindings, and a diagnostic sink.
pub struct RuleContext<'a> {
    node: &'a Expr,
    tree: &'a SyntaxTree,
    classifier: &'a NodeClassifier<'a>,
    sink: &'a mut Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn new(
        node: &'a Expr,
        tree: &'a SyntaxTree,
        classifier: &'a NodeClassifier<'a>,
        sink: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            node,
            tree,
            classifier,
            sink,
        }
    }

    /// The node currently being visited.
    pub fn node(&self) -> &'a Expr {
        self.node
    }

    /// The tree the node belongs to.
    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// Source text covered by `span`.
    pub fn text(&self, span: Span) -> &'a str {
        self.tree.text(span)
    }

    /// Static type of an expression reachable from the current node, via the
    /// external resolver. Absence means "no match", never a match.
    pub fn type_of(&self, expr: &Expr) -> Option<&'a str> {
        self.classifier.type_of(expr)
    }

    /// Emit a diagnostic for `descriptor` at `span`, resolving its message
    /// template against `args`.
    pub fn report(&mut self, descriptor: &RuleDescriptor, span: Span, args: &[&str]) {
        self.sink.push(Diagnostic::new(
            descriptor.id,
            descriptor.severity,
            &descriptor.format_message(args),
            span,
        ));
    }
}

/// A polymorphic detection/transformation unit.
///
/// Rules are constructed once at registry build and are stateless across
/// invocations: `analyze` must depend only on syntactic shape and type
/// bindings, so independent trees can be analyzed concurrently.
pub trait Rule: Send + Sync {
    fn descriptor(&self) -> &RuleDescriptor;

    /// Node categories this rule wants dispatched to.
    fn triggers(&self) -> &[NodeKind];

    /// Inspect the context's node and emit zero or more diagnostics.
    fn analyze(&self, ctx: &mut RuleContext<'_>);

    /// Compute the edit for a previously reported diagnostic. The rule must
    /// re-validate that the span still holds its pattern and return
    /// [`FixError::LocationMismatch`] otherwise.
    fn fix(&self, tree: &SyntaxTree, diagnostic: &Diagnostic) -> Result<TextEdit, FixError> {
        let _ = tree;
        let _ = diagnostic;
        Err(FixError::FixUnsupported(self.descriptor().id.to_string()))
    }
}
