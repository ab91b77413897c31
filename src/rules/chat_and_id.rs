//! Rule: redundant chat-and-id argument pair
//!
//! For operations that accept either a chat reference plus a message id or a
//! single message object, passing `x.Chat, x.MessageId` is redundant when `x`
//! is the message itself. The fix collapses the pair to `x`.

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::FixError;
use crate::rule::{Rule, RuleContext, RuleDescriptor, TextEdit};
use crate::semantic::MESSAGE_TYPE;
use crate::syntax::{CallExpr, Expr, MemberExpr, NodeKind, Span, SyntaxTree};

pub const CHAT_AND_ID_REDUNDANT: &str = "chat-and-id-redundant";

/// Operations known to accept a message-object overload.
const METHOD_WHITELIST: [&str; 9] = [
    "ForwardMessageAsync",
    "StopMessageLiveLocationAsync",
    "EditMessageTextAsync",
    "EditMessageCaptionAsync",
    "EditMessageMediaAsync",
    "EditMessageReplyMarkupAsync",
    "EditMessageLiveLocationAsync",
    "DeleteMessageAsync",
    "PinChatMessageAsync",
];

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: CHAT_AND_ID_REDUNDANT,
    title: "Method call parameters can be simplified",
    message_template:
        "Use an overload for {0} that takes a message parameter, instead of chat and message-id",
    category: "api-usage",
    severity: Severity::Warning,
    supports_fix: true,
};

pub struct ChatAndIdRedundant;

impl ChatAndIdRedundant {
    /// The adjacent `<base>.Chat`, `<base>.MessageId` pair starting at
    /// argument `i`, if its shape matches. Type gating is separate so the
    /// fix can re-validate shape without a resolver.
    fn pair_at<'a>(
        tree: &SyntaxTree,
        call: &'a CallExpr,
        i: usize,
    ) -> Option<(&'a MemberExpr, &'a MemberExpr)> {
        let chat = call.args[i].as_member()?;
        let message_id = call.args[i + 1].as_member()?;
        if chat.member != "Chat" || message_id.member != "MessageId" {
            return None;
        }
        // Same base expression, by source text
        if tree.text(chat.base.span()) != tree.text(message_id.base.span()) {
            return None;
        }
        Some((chat, message_id))
    }
}

impl Rule for ChatAndIdRedundant {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn triggers(&self) -> &[NodeKind] {
        &[NodeKind::MethodCall]
    }

    fn analyze(&self, ctx: &mut RuleContext<'_>) {
        let Expr::Call(call) = ctx.node() else {
            return;
        };
        let Some(method_name) = call.method_name() else {
            return;
        };
        if !METHOD_WHITELIST.contains(&method_name) {
            return;
        }
        if call.args.len() < 2 {
            return;
        }

        for i in 0..call.args.len() - 1 {
            let Some((chat, message_id)) = Self::pair_at(ctx.tree(), call, i) else {
                continue;
            };
            if ctx.type_of(&chat.base) != Some(MESSAGE_TYPE)
                || ctx.type_of(&message_id.base) != Some(MESSAGE_TYPE)
            {
                continue;
            }

            let span = Span::cover(chat.span, message_id.span);
            ctx.report(&DESCRIPTOR, span, &[method_name]);
            // Single-fix-per-call policy: only the first adjacent pair is
            // reported.
            break;
        }
    }

    fn fix(&self, tree: &SyntaxTree, diagnostic: &Diagnostic) -> Result<TextEdit, FixError> {
        for node in tree.iter() {
            let Expr::Call(call) = node else {
                continue;
            };
            for i in 0..call.args.len().saturating_sub(1) {
                if call.args[i].span().start != diagnostic.span.start
                    || call.args[i + 1].span().end() != diagnostic.span.end()
                {
                    continue;
                }
                let Some((chat, _)) = Self::pair_at(tree, call, i) else {
                    continue;
                };
                // Net effect: `(x.Chat, x.MessageId, ...)` -> `(x, ...)`
                return Ok(TextEdit {
                    span: diagnostic.span,
                    replacement: tree.text(chat.base.span()).to_string(),
                });
            }
        }

        Err(FixError::LocationMismatch {
            rule_id: CHAT_AND_ID_REDUNDANT.to_string(),
            span: diagnostic.span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::semantic::TypeTable;
    use pretty_assertions::assert_eq;

    fn engine() -> Engine {
        Engine::with_builtin_rules().unwrap()
    }

    fn message_table() -> TypeTable {
        TypeTable::new().bind("message", MESSAGE_TYPE)
    }

    fn rule_a(diags: &[Diagnostic]) -> Vec<&Diagnostic> {
        diags
            .iter()
            .filter(|d| d.rule_id == CHAT_AND_ID_REDUNDANT)
            .collect()
    }

    #[test]
    fn test_detects_adjacent_pair() {
        let source = "EditMessageTextAsync(message.Chat, message.MessageId, 1, 2)";
        let (tree, diags) = engine().analyze_source(source, &message_table()).unwrap();
        let matches = rule_a(&diags);
        assert_eq!(matches.len(), 1);
        assert_eq!(
            tree.text(matches[0].span),
            "message.Chat, message.MessageId"
        );
        assert_eq!(
            matches[0].message,
            "Use an overload for EditMessageTextAsync that takes a message parameter, \
             instead of chat and message-id"
        );
    }

    #[test]
    fn test_span_is_exact_despite_whitespace() {
        let source = "DeleteMessageAsync( message.Chat ,   message.MessageId )";
        let (tree, diags) = engine().analyze_source(source, &message_table()).unwrap();
        let matches = rule_a(&diags);
        assert_eq!(matches.len(), 1);
        // Starts at the first argument's start, ends at the second's end.
        assert_eq!(
            tree.text(matches[0].span),
            "message.Chat ,   message.MessageId"
        );
    }

    #[test]
    fn test_whitelist_gating() {
        // Same argument shapes, but the method is not whitelisted.
        let source = "SomeOtherMethod(message.Chat, message.MessageId)";
        let (_, diags) = engine().analyze_source(source, &message_table()).unwrap();
        assert!(rule_a(&diags).is_empty());
    }

    #[test]
    fn test_type_gating() {
        // `other` does not resolve to the message type.
        let source = "DeleteMessageAsync(other.Chat, other.MessageId)";
        let table = TypeTable::new().bind("other", "Update");
        let (_, diags) = engine().analyze_source(source, &table).unwrap();
        assert!(rule_a(&diags).is_empty());
    }

    #[test]
    fn test_unresolved_type_fails_open() {
        let source = "DeleteMessageAsync(message.Chat, message.MessageId)";
        let (_, diags) = engine().analyze_source(source, &TypeTable::new()).unwrap();
        assert!(rule_a(&diags).is_empty());
    }

    #[test]
    fn test_non_adjacent_pair_not_reported() {
        let source = "ForwardMessageAsync(message.Chat, otherId, message.MessageId)";
        let (_, diags) = engine().analyze_source(source, &message_table()).unwrap();
        assert!(rule_a(&diags).is_empty());
    }

    #[test]
    fn test_different_bases_not_reported() {
        let source = "DeleteMessageAsync(message.Chat, reply.MessageId)";
        let table = TypeTable::new()
            .bind("message", MESSAGE_TYPE)
            .bind("reply", MESSAGE_TYPE);
        let (_, diags) = engine().analyze_source(source, &table).unwrap();
        assert!(rule_a(&diags).is_empty());
    }

    #[test]
    fn test_first_match_only() {
        // Two candidate adjacent pairs; only the leftmost is reported.
        let source = "EditMessageTextAsync(message.Chat, message.MessageId, \
                      message.Chat, message.MessageId)";
        let (tree, diags) = engine().analyze_source(source, &message_table()).unwrap();
        let matches = rule_a(&diags);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].span.start, tree.source().find("message").unwrap());
    }

    #[test]
    fn test_fix_collapses_pair_to_base() {
        let source = "EditMessageTextAsync(message.Chat, message.MessageId, 1, 2)";
        let (tree, diags) = engine().analyze_source(source, &message_table()).unwrap();
        let edit = ChatAndIdRedundant.fix(&tree, rule_a(&diags)[0]).unwrap();
        assert_eq!(edit.replacement, "message");
    }

    #[test]
    fn test_fix_location_mismatch() {
        let source = "EditMessageTextAsync(message.Chat, message.MessageId)";
        let tree = SyntaxTree::parse(source).unwrap();
        let stale = Diagnostic::new(
            CHAT_AND_ID_REDUNDANT,
            Severity::Warning,
            "stale",
            Span::new(0, 10),
        );
        let err = ChatAndIdRedundant.fix(&tree, &stale).unwrap_err();
        assert!(matches!(err, FixError::LocationMismatch { .. }));
    }
}
