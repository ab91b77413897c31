//! Error types for parsing, analysis, and fix application

use crate::syntax::Span;
use thiserror::Error;

/// Error while parsing source text into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at offset {offset}: {message}")]
pub struct ParseError {
    /// Byte offset where parsing failed
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Error during registry construction or analysis.
#[derive(Debug, Error)]
pub enum Error {
    /// Two rules registered the same identifier. This is a configuration
    /// error and fails registry construction immediately.
    #[error("duplicate rule id `{0}`")]
    DuplicateRule(String),

    /// The host canceled the analysis via its cancellation flag.
    #[error("analysis canceled")]
    Canceled,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Error during fix application.
#[derive(Debug, Error)]
pub enum FixError {
    /// No registered rule owns the diagnostic's identifier.
    #[error("no rule registered for diagnostic `{0}`")]
    UnknownRule(String),

    /// The owning rule declares no fix.
    #[error("rule `{0}` does not support fixes")]
    FixUnsupported(String),

    /// The diagnostic's span no longer matches the rule's expected shape in
    /// the current tree. The caller must re-analyze before retrying.
    #[error("location mismatch for `{rule_id}` at {span}: re-analyze before retrying")]
    LocationMismatch { rule_id: String, span: Span },

    /// A fix failed to shrink the source, which would break batch-fix
    /// termination.
    #[error("fix for `{0}` did not shrink the source")]
    NoProgress(String),

    /// Batch fixing exceeded its iteration cap.
    #[error("fix-all for `{rule_id}` exceeded {limit} iterations")]
    IterationLimit { rule_id: String, limit: usize },

    /// The rewritten source failed to re-parse. Fixes only splice well-formed
    /// replacements, so this indicates a broken fix implementation.
    #[error("rewritten source failed to re-parse: {0}")]
    Reparse(#[from] ParseError),

    /// Re-analysis during batch fixing failed.
    #[error(transparent)]
    Analysis(#[from] Error),
}
