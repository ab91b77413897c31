//! msglint - a rule engine for messaging-client API misuse
//!
//! Walks a parsed expression tree, detects API-misuse patterns, reports
//! precisely-located diagnostics, and can mechanically rewrite the offending
//! code into the preferred form.
//!
//! # Architecture
//!
//! ```text
//! source -> parse -> Engine (via RuleRegistry) -> diagnostics
//!                                                     |
//!                       re-parse loop <- Fixer <- [optional]
//! ```
//!
//! The registry holds a closed, compile-time set of rules indexed by the
//! node category they trigger on. The engine walks the tree once in
//! pre-order, dispatching each node to its interested rules. Each fix
//! replaces exactly the diagnostic's span and re-parses, so batch fixing is
//! a fix/re-analyze loop that terminates because every fix shrinks the
//! source.
//!
//! # Example
//!
//! ```
//! use msglint::{Engine, Fixer, TypeTable, MESSAGE_TYPE};
//!
//! let engine = Engine::with_builtin_rules().unwrap();
//! let types = TypeTable::new().bind("message", MESSAGE_TYPE);
//!
//! let (tree, diagnostics) = engine
//!     .analyze_source("send(message.Chat.Id, \"hello\")", &types)
//!     .unwrap();
//! assert_eq!(diagnostics.len(), 1);
//!
//! let fixed = Fixer::new(&engine).apply_fix(&tree, &diagnostics[0]).unwrap();
//! assert_eq!(fixed.source(), "send(message.Chat, \"hello\")");
//! ```

pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod fixer;
pub mod output;
pub mod parser;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod semantic;
pub mod syntax;

// Re-export main types
pub use config::{Config, RuleConfig};
pub use diagnostic::{Diagnostic, Severity};
pub use engine::{CancelFlag, Engine};
pub use error::{Error, FixError, ParseError};
pub use fixer::{FixAllOutcome, Fixer};
pub use output::{render, render_json, render_text, OutputFormat};
pub use registry::RuleRegistry;
pub use rule::{Rule, RuleContext, RuleDescriptor, TextEdit};
pub use rules::{CHAT_AND_ID_REDUNDANT, CHAT_DOT_ID_REDUNDANT};
pub use semantic::{NodeClassifier, TypeResolver, TypeTable, MESSAGE_TYPE};
pub use syntax::{Expr, NodeKind, Span, SyntaxTree};
