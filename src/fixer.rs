//! Fix application: single fixes and "fix all" batch semantics
//!
//! A fix either fully succeeds, producing a freshly parsed tree with exactly
//! the diagnostic's span replaced, or fails leaving the original untouched.

use crate::diagnostic::Diagnostic;
use crate::error::FixError;
use crate::engine::Engine;
use crate::semantic::TypeResolver;
use crate::syntax::SyntaxTree;

/// Result of a batch fix run.
#[derive(Debug)]
pub struct FixAllOutcome {
    /// The tree after the final fix
    pub tree: SyntaxTree,
    /// Number of fixes applied
    pub fixes_applied: usize,
}

/// Applies rule fixes to trees via the engine's registry.
pub struct Fixer<'a> {
    engine: &'a Engine,
}

impl<'a> Fixer<'a> {
    pub fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Apply one fix. Pure function of (tree, diagnostic): locates the
    /// owning rule by the diagnostic's identifier, lets it re-validate the
    /// span and compute the edit, splices the replacement, and re-parses.
    pub fn apply_fix(
        &self,
        tree: &SyntaxTree,
        diagnostic: &Diagnostic,
    ) -> Result<SyntaxTree, FixError> {
        let rule = self
            .engine
            .registry()
            .rule_by_id(&diagnostic.rule_id)
            .ok_or_else(|| FixError::UnknownRule(diagnostic.rule_id.clone()))?;

        if !rule.descriptor().supports_fix {
            return Err(FixError::FixUnsupported(diagnostic.rule_id.clone()));
        }

        let edit = rule.fix(tree, diagnostic)?;

        // Both built-in fixes delete text; a non-shrinking edit would break
        // batch-fix termination.
        if edit.replacement.len() >= edit.span.len {
            return Err(FixError::NoProgress(diagnostic.rule_id.clone()));
        }

        let source = tree.source();
        let mut rewritten =
            String::with_capacity(source.len() - edit.span.len + edit.replacement.len());
        rewritten.push_str(&source[..edit.span.start]);
        rewritten.push_str(&edit.replacement);
        rewritten.push_str(&source[edit.span.end()..]);

        log::debug!(
            "applied fix for `{}` at {}: `{}` -> `{}`",
            diagnostic.rule_id,
            diagnostic.span,
            tree.text(edit.span),
            edit.replacement
        );

        Ok(SyntaxTree::parse(&rewritten)?)
    }

    /// Repeatedly fix the first remaining diagnostic for `rule_id` until
    /// none remain. Fixes are strictly sequential: each application starts
    /// from a freshly re-analyzed tree.
    pub fn fix_all(
        &self,
        tree: &SyntaxTree,
        rule_id: &str,
        resolver: &dyn TypeResolver,
    ) -> Result<FixAllOutcome, FixError> {
        let mut current = tree.clone();
        let mut fixes_applied = 0;

        // Each fix strictly removes at least one byte (`apply_fix` rejects
        // non-shrinking edits), so the source length bounds the number of
        // iterations. The first pass's diagnostic count is not a valid
        // bound: a rule reporting only its first match per call can reveal
        // further matches after each fix.
        let limit = current.source().len();
        let first_pass = self.engine.analyze(&current, resolver)?;

        loop {
            let diagnostics = if fixes_applied == 0 {
                first_pass.clone()
            } else {
                self.engine.analyze(&current, resolver)?
            };

            let Some(diagnostic) = diagnostics.iter().find(|d| d.rule_id == rule_id) else {
                break;
            };

            if fixes_applied >= limit {
                return Err(FixError::IterationLimit {
                    rule_id: rule_id.to_string(),
                    limit,
                });
            }

            let next = self.apply_fix(&current, diagnostic)?;
            if next.source().len() >= current.source().len() {
                return Err(FixError::NoProgress(rule_id.to_string()));
            }

            current = next;
            fixes_applied += 1;
        }

        log::debug!("fix-all for `{}` applied {} fixes", rule_id, fixes_applied);

        Ok(FixAllOutcome {
            tree: current,
            fixes_applied,
        })
    }
}
