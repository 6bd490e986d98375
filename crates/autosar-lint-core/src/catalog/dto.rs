//! TOML deserialization types for rule catalogs.
//!
//! These types exist solely for serde deserialization.
//! They are converted to [`Rule`](crate::rule::Rule) values by the loader.

use serde::Deserialize;

/// Raw TOML representation of a rule catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleCatalogDto {
    /// `[[rules]]` entries in file order.
    #[serde(default)]
    pub rules: Vec<RuleDto>,
}

/// TOML representation of one rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDto {
    /// Rule code (e.g., "A5-1-1").
    pub code: String,
    /// Severity string: "error", "warning" or "info".
    pub severity: String,
    /// Category name.
    pub category: String,
    /// Regular expression source.
    pub pattern: String,
    /// Whether `.` also matches `\n`.
    #[serde(rename = "dot-matches-newline", default)]
    pub dot_matches_newline: bool,
    /// Violation message.
    pub message: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Why the rule exists.
    #[serde(default)]
    pub rationale: Option<String>,
    /// How to fix a violation.
    #[serde(default)]
    pub remediation: Option<String>,
}
