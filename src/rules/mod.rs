//! Built-in rule catalog
//!
//! This table is the only extension surface: new rules are added here and
//! never require engine changes.

pub mod chat_and_id;
pub mod chat_dot_id;

pub use chat_and_id::{ChatAndIdRedundant, CHAT_AND_ID_REDUNDANT};
pub use chat_dot_id::{ChatDotIdRedundant, CHAT_DOT_ID_REDUNDANT};

use crate::rule::Rule;

/// The static rule table, in registration order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ChatAndIdRedundant),
        Box::new(ChatDotIdRedundant),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rule_ids_are_stable() {
        let ids: Vec<&str> = builtin_rules()
            .iter()
            .map(|rule| rule.descriptor().id)
            .collect();
        assert_eq!(ids, vec!["chat-and-id-redundant", "chat-dot-id-redundant"]);
    }

    #[test]
    fn test_builtin_rules_support_fixes() {
        for rule in builtin_rules() {
            assert!(rule.descriptor().supports_fix, "{}", rule.descriptor().id);
        }
    }
}
