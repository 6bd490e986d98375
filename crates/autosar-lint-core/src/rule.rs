//! Rule definitions: metadata plus a compiled textual pattern.

use crate::types::Severity;
use fancy_regex::{Regex, RegexBuilder};

/// Default backtracking budget for a single match attempt.
///
/// Patterns exceeding it fail evaluation instead of hanging the pass.
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Compilation options for rule patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
    /// Whether `.` also matches `\n`.
    pub dot_matches_newline: bool,
    /// Maximum backtracking steps before evaluation fails.
    pub backtrack_limit: usize,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            dot_matches_newline: false,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
        }
    }
}

/// A compiled rule pattern.
///
/// Always multi-line (`^`/`$` anchor at line boundaries) and case-sensitive.
/// Lookaround and back-references are supported.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    options: PatternOptions,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex engine error if the pattern is malformed or uses
    /// an unsupported construct.
    pub fn compile(source: &str, options: PatternOptions) -> Result<Self, fancy_regex::Error> {
        let flags = if options.dot_matches_newline {
            "(?ms)"
        } else {
            "(?m)"
        };
        let regex = RegexBuilder::new(&format!("{flags}{source}"))
            .backtrack_limit(options.backtrack_limit)
            .build()?;
        Ok(Self {
            source: source.to_string(),
            options,
            regex,
        })
    }

    /// Returns the pattern text as written in the catalog.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the options the pattern was compiled with.
    #[must_use]
    pub fn options(&self) -> PatternOptions {
        self.options
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// A named pattern-based check with severity, category and rationale.
///
/// Rules are immutable once built; registries hand out shared references.
#[derive(Debug, Clone)]
pub struct Rule {
    code: String,
    message: String,
    severity: Severity,
    pattern: Pattern,
    description: String,
    category: String,
    rationale: Option<String>,
    remediation: Option<String>,
}

impl Rule {
    /// Creates a rule from a compiled pattern.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        severity: Severity,
        category: impl Into<String>,
        pattern: Pattern,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
            pattern,
            description: String::new(),
            category: category.into(),
            rationale: None,
            remediation: None,
        }
    }

    /// Sets the long description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the rationale.
    #[must_use]
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    /// Sets the remediation hint.
    #[must_use]
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    /// Returns a copy of this rule with another severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Rule code (e.g., "A5-1-1").
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Violation message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Severity of violations.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Long description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Category name.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Why the rule exists, if documented.
    #[must_use]
    pub fn rationale(&self) -> Option<&str> {
        self.rationale.as_deref()
    }

    /// How to fix a violation, if documented.
    #[must_use]
    pub fn remediation(&self) -> Option<&str> {
        self.remediation.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_keeps_source_and_options() {
        let pattern = Pattern::compile(r"\bgoto\b", PatternOptions::default()).unwrap();
        assert_eq!(pattern.as_str(), r"\bgoto\b");
        assert!(!pattern.options().dot_matches_newline);
    }

    #[test]
    fn compile_supports_lookaround_and_backrefs() {
        assert!(Pattern::compile(r"throw\s+(?!std::)", PatternOptions::default()).is_ok());
        assert!(Pattern::compile(r"\bint\s+(\w+)\s*=.*\n.*\bint\s+\1", PatternOptions::default()).is_ok());
    }

    #[test]
    fn compile_rejects_malformed_pattern() {
        assert!(Pattern::compile(r"foo(", PatternOptions::default()).is_err());
    }

    #[test]
    fn anchors_are_line_based() {
        let pattern = Pattern::compile(r"^b$", PatternOptions::default()).unwrap();
        assert!(pattern.regex().is_match("a\nb\nc").unwrap());
    }

    #[test]
    fn rule_builder_sets_metadata() {
        let pattern = Pattern::compile(r"\bgoto\b", PatternOptions::default()).unwrap();
        let rule = Rule::new("A6-6-1", Severity::Error, "6. Statements", pattern, "No goto")
            .with_description("goto shall not be used")
            .with_rationale("Unstructured control flow")
            .with_remediation("Use structured loops");

        assert_eq!(rule.code(), "A6-6-1");
        assert_eq!(rule.severity(), Severity::Error);
        assert_eq!(rule.category(), "6. Statements");
        assert_eq!(rule.rationale(), Some("Unstructured control flow"));
        assert_eq!(rule.remediation(), Some("Use structured loops"));
        assert_eq!(rule.with_severity(Severity::Info).severity(), Severity::Info);
    }
}
