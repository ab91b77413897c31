//! Host-facing diagnostic rendering

use crate::diagnostic::Diagnostic;

/// Output format for diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per diagnostic
    #[default]
    Text,
    /// JSON array of diagnostics
    Json,
}

/// Render diagnostics in the requested format.
pub fn render(diagnostics: &[Diagnostic], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(diagnostics),
        OutputFormat::Json => render_json(diagnostics),
    }
}

/// One line per diagnostic: `severity[rule-id] span: message`.
pub fn render_text(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::new();
    for diagnostic in diagnostics {
        output.push_str(&format!(
            "{}[{}] {}: {}\n",
            diagnostic.severity, diagnostic.rule_id, diagnostic.span, diagnostic.message
        ));
    }
    output
}

/// Pretty-printed JSON array of diagnostics.
pub fn render_json(diagnostics: &[Diagnostic]) -> String {
    // Diagnostic's Serialize impl only produces serializable types.
    serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string())
}
