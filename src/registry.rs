//! Rule registry: the closed, compile-time set of rules indexed by trigger

use crate::error::Error;
use crate::rule::{Rule, RuleDescriptor};
use crate::syntax::NodeKind;
use std::collections::{HashMap, HashSet};

/// Holds every registered rule and an index from node category to the rules
/// triggered by it. Immutable after construction; rule order within a
/// category is registration order and is stable across runs.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
    by_kind: HashMap<NodeKind, Vec<usize>>,
}

impl RuleRegistry {
    /// Build a registry from an explicit rule list. Two rules with the same
    /// identifier are a configuration error and fail construction.
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Result<Self, Error> {
        let mut seen: HashSet<&'static str> = HashSet::new();
        let mut by_kind: HashMap<NodeKind, Vec<usize>> = HashMap::new();

        for (index, rule) in rules.iter().enumerate() {
            let id = rule.descriptor().id;
            if !seen.insert(id) {
                return Err(Error::DuplicateRule(id.to_string()));
            }
            for kind in rule.triggers() {
                by_kind.entry(*kind).or_default().push(index);
            }
        }

        log::debug!("registered {} rules", rules.len());
        Ok(Self { rules, by_kind })
    }

    /// Registry over the built-in rule table.
    pub fn builtin() -> Result<Self, Error> {
        Self::new(crate::rules::builtin_rules())
    }

    /// Descriptors of every registered rule, in registration order.
    pub fn descriptors(&self) -> Vec<&RuleDescriptor> {
        self.rules.iter().map(|rule| rule.descriptor()).collect()
    }

    /// Rules triggered by `kind`, with their registration index, in
    /// registration order. Empty if none registered.
    pub fn rules_for(&self, kind: NodeKind) -> impl Iterator<Item = (usize, &dyn Rule)> + '_ {
        self.by_kind
            .get(&kind)
            .map(|indices| indices.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&index| (index, self.rules[index].as_ref()))
    }

    /// The rule owning `id`, if registered.
    pub fn rule_by_id(&self, id: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.descriptor().id == id)
            .map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
