//! Rule: redundant `.Id` on a message's chat
//!
//! APIs taking a chat reference accept the chat object itself; reaching
//! through to `x.Chat.Id` is redundant when `x` is the message. The fix
//! drops the trailing `.Id`.

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::FixError;
use crate::rule::{Rule, RuleContext, RuleDescriptor, TextEdit};
use crate::semantic::MESSAGE_TYPE;
use crate::syntax::{Expr, MemberExpr, NodeKind, SyntaxTree};

pub const CHAT_DOT_ID_REDUNDANT: &str = "chat-dot-id-redundant";

const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: CHAT_DOT_ID_REDUNDANT,
    title: "The chat should be used instead of its id",
    message_template: "Use {0}.Chat instead of {0}.Chat.Id",
    category: "api-usage",
    severity: Severity::Warning,
    supports_fix: true,
};

pub struct ChatDotIdRedundant;

impl ChatDotIdRedundant {
    /// The `<base>.Chat` access under `expr` when `expr` is `<base>.Chat.Id`.
    fn chat_access(expr: &Expr) -> Option<&MemberExpr> {
        let id = expr.as_member()?;
        if id.member != "Id" {
            return None;
        }
        let chat = id.base.as_member()?;
        if chat.member != "Chat" {
            return None;
        }
        Some(chat)
    }
}

impl Rule for ChatDotIdRedundant {
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

        // Every matching argument is reported, not just the first.
        for arg in &call.args {
            let Some(chat) = Self::chat_access(arg) else {
                continue;
            };
            if ctx.type_of(&chat.base) != Some(MESSAGE_TYPE) {
                continue;
            }

            let base_text = ctx.text(chat.base.span());
            ctx.report(&DESCRIPTOR, arg.span(), &[base_text]);
        }
    }

    fn fix(&self, tree: &SyntaxTree, diagnostic: &Diagnostic) -> Result<TextEdit, FixError> {
        let matching = tree
            .node_at(diagnostic.span)
            .and_then(Self::chat_access);

        match matching {
            // Net effect: `x.Chat.Id` -> `x.Chat`
            Some(chat) => Ok(TextEdit {
                span: diagnostic.span,
                replacement: tree.text(chat.span).to_string(),
            }),
            None => Err(FixError::LocationMismatch {
                rule_id: CHAT_DOT_ID_REDUNDANT.to_string(),
                span: diagnostic.span,
            }),
        }
    }
}
