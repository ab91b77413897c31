//! Engine configuration: per-rule enablement and severity overrides

use crate::diagnostic::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Settings for one rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether the rule runs at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Override the rule's default severity
    #[serde(default)]
    pub severity: Option<Severity>,
}

fn default_true() -> bool {
    true
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

/// Engine configuration. Rules not mentioned keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Disable a rule.
    pub fn disable(mut self, rule_id: &str) -> Self {
        self.rules.entry(rule_id.to_string()).or_default().enabled = false;
        self
    }

    /// Override a rule's severity.
    pub fn with_severity(mut self, rule_id: &str, severity: Severity) -> Self {
        self.rules.entry(rule_id.to_string()).or_default().severity = Some(severity);
        self
    }

    /// Whether the rule should run.
    pub fn rule_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id).map_or(true, |rule| rule.enabled)
    }

    /// Severity override for the rule, if configured.
    pub fn severity_override(&self, rule_id: &str) -> Option<Severity> {
        self.rules.get(rule_id).and_then(|rule| rule.severity)
    }
}
