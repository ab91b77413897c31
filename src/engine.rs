//! Dispatch engine: routes tree nodes to registered rules

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::error::Error;
use crate::registry::RuleRegistry;
use crate::rule::{RuleContext, RuleDescriptor};
use crate::semantic::{NodeClassifier, TypeResolver};
use crate::syntax::SyntaxTree;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag. The engine checks it once per node visit;
/// a host may cancel from another thread at any time.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The analysis engine: one registry, one configuration, any number of trees.
///
/// Immutable after construction, so independent sources may be analyzed fully
/// in parallel ([`Engine::analyze_many`]). Within one tree the traversal is
/// single-threaded and ordered, because diagnostic ordering and first-match
/// policies depend on a deterministic visit order.
pub struct Engine {
    registry: RuleRegistry,
    config: Config,
}

impl Engine {
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry,
            config: Config::default(),
        }
    }

    /// Engine over the built-in rule table.
    pub fn with_builtin_rules() -> Result<Self, Error> {
        Ok(Self::new(RuleRegistry::builtin()?))
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Descriptors of every rule this engine can report, for host capability
    /// declaration.
    pub fn descriptors(&self) -> Vec<&RuleDescriptor> {
        self.registry.descriptors()
    }

    /// Analyze one tree, visiting every node exactly once in pre-order.
    pub fn analyze(
        &self,
        tree: &SyntaxTree,
        resolver: &dyn TypeResolver,
    ) -> Result<Vec<Diagnostic>, Error> {
        self.analyze_with(tree, resolver, &CancelFlag::new())
    }

    /// Analyze one tree, checking `cancel` cooperatively at each node visit.
    ///
    /// Diagnostics come back in traversal order, with ties broken by rule id
    /// and then by rule-registration order.
    pub fn analyze_with(
        &self,
        tree: &SyntaxTree,
        resolver: &dyn TypeResolver,
        cancel: &CancelFlag,
    ) -> Result<Vec<Diagnostic>, Error> {
        let classifier = NodeClassifier::new(resolver);
        let mut keyed: Vec<(usize, usize, Diagnostic)> = Vec::new();
        let mut scratch: Vec<Diagnostic> = Vec::new();

        for (visit_index, node) in tree.iter().enumerate() {
            if cancel.is_canceled() {
                return Err(Error::Canceled);
            }

            for (registration_index, rule) in self.registry.rules_for(classifier.kind(node)) {
                if !self.config.rule_enabled(rule.descriptor().id) {
                    continue;
                }

                let mut ctx = RuleContext::new(node, tree, &classifier, &mut scratch);
                rule.analyze(&mut ctx);

                for diagnostic in scratch.drain(..) {
                    keyed.push((visit_index, registration_index, diagnostic));
                }
            }
        }

        keyed.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| a.2.rule_id.cmp(&b.2.rule_id))
                .then_with(|| a.1.cmp(&b.1))
        });

        log::debug!(
            "analysis produced {} diagnostics over {} bytes",
            keyed.len(),
            tree.source().len()
        );

        Ok(keyed
            .into_iter()
            .map(|(_, _, mut diagnostic)| {
                if let Some(severity) = self.config.severity_override(&diagnostic.rule_id) {
                    diagnostic.severity = severity;
                }
                diagnostic
            })
            .collect())
    }

    /// Parse and analyze a source string.
    pub fn analyze_source(
        &self,
        source: &str,
        resolver: &dyn TypeResolver,
    ) -> Result<(SyntaxTree, Vec<Diagnostic>), Error> {
        let tree = SyntaxTree::parse(source)?;
        let diagnostics = self.analyze(&tree, resolver)?;
        Ok((tree, diagnostics))
    }

    /// Analyze many independent sources in parallel. Results keep the input
    /// order; each source is still traversed sequentially.
    pub fn analyze_many(
        &self,
        jobs: &[(&str, &dyn TypeResolver)],
    ) -> Vec<Result<Vec<Diagnostic>, Error>> {
        jobs.par_iter()
            .map(|(source, resolver)| {
                let tree = SyntaxTree::parse(source)?;
                self.analyze(&tree, *resolver)
            })
            .collect()
    }
}
