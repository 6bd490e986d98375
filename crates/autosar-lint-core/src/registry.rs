//! The rule registry.
//!
//! Built once at startup and shared read-only afterwards. Registration
//! order is significant: it fixes the order of rule evaluation and
//! therefore the canonical order of violations.

use crate::config::Config;
use crate::rule::Rule;
use crate::types::Severity;
use std::collections::{BTreeSet, HashMap};

/// A rule could not be registered.
#[derive(Debug, thiserror::Error)]
pub enum RuleDefinitionError {
    /// Rule has an empty code.
    #[error("rules[{index}]: rule code must not be empty")]
    EmptyCode {
        /// Position of the rule in its catalog.
        index: usize,
    },

    /// Unknown severity string.
    #[error("{code}: unknown severity `{value}`, expected: error, warning, info")]
    UnknownSeverity {
        /// Offending rule.
        code: String,
        /// The invalid value.
        value: String,
    },

    /// Pattern failed to compile.
    #[error("{code}: invalid pattern: {source}")]
    InvalidPattern {
        /// Offending rule.
        code: String,
        /// Compile error from the regex engine.
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// Two rules share a code.
    #[error("{code}: duplicate rule code")]
    DuplicateCode {
        /// The duplicated code.
        code: String,
    },
}

/// Immutable, ordered collection of rules.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Builds a registry from rules in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`RuleDefinitionError::DuplicateCode`] for the first code
    /// registered twice, or [`RuleDefinitionError::EmptyCode`] for a rule
    /// without a code. Nothing is registered on error.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleDefinitionError> {
        let mut index = HashMap::with_capacity(rules.len());
        for (i, rule) in rules.iter().enumerate() {
            if rule.code().is_empty() {
                return Err(RuleDefinitionError::EmptyCode { index: i });
            }
            if index.insert(rule.code().to_string(), i).is_some() {
                return Err(RuleDefinitionError::DuplicateCode {
                    code: rule.code().to_string(),
                });
            }
        }
        Ok(Self { rules, index })
    }

    /// All rules in registration order.
    #[must_use]
    pub fn all(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up a rule by code.
    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&Rule> {
        self.index.get(code).map(|&i| &self.rules[i])
    }

    /// Rules of one category, in registration order.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.category() == category)
    }

    /// Rules of one severity, in registration order.
    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter().filter(move |r| r.severity() == severity)
    }

    /// Distinct category names.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<&str> {
        self.rules.iter().map(Rule::category).collect()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Keeps only rules matching `keep`, preserving order.
    #[must_use]
    pub fn filter(self, keep: impl Fn(&Rule) -> bool) -> Self {
        let rules: Vec<Rule> = self.rules.into_iter().filter(|r| keep(r)).collect();
        Self::reindexed(rules)
    }

    /// Appends the rules of `other` after this registry's rules.
    ///
    /// # Errors
    ///
    /// Returns [`RuleDefinitionError::DuplicateCode`] if a code exists in both.
    pub fn merge(self, other: Self) -> Result<Self, RuleDefinitionError> {
        let mut rules = self.rules;
        rules.extend(other.rules);
        Self::new(rules)
    }

    /// Applies the `[rules]` section of `config`: drops disabled rules and
    /// replaces overridden severities. Codes not in the registry are ignored.
    #[must_use]
    pub fn configured(self, config: &Config) -> Self {
        if config.rules.is_empty() {
            return self;
        }
        let rules = self
            .rules
            .into_iter()
            .filter_map(|rule| {
                if !config.is_rule_enabled(rule.code()) {
                    tracing::debug!(code = rule.code(), "rule disabled by configuration");
                    return None;
                }
                Some(match config.rule_severity(rule.code()) {
                    Some(severity) => rule.with_severity(severity),
                    None => rule,
                })
            })
            .collect();
        Self::reindexed(rules)
    }

    fn reindexed(rules: Vec<Rule>) -> Self {
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, r)| (r.code().to_string(), i))
            .collect();
        Self { rules, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Pattern, PatternOptions};

    fn rule(code: &str, severity: Severity, category: &str) -> Rule {
        Rule::new(
            code,
            severity,
            category,
            Pattern::compile(r"\bx\b", PatternOptions::default()).unwrap(),
            "msg",
        )
    }

    fn sample() -> Registry {
        Registry::new(vec![
            rule("A5-1-1", Severity::Info, "5. Expressions"),
            rule("A6-6-1", Severity::Error, "6. Statements"),
            rule("A5-2-2", Severity::Warning, "5. Expressions"),
        ])
        .unwrap()
    }

    fn codes<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Vec<&'a str> {
        rules.into_iter().map(Rule::code).collect()
    }

    #[test]
    fn preserves_registration_order() {
        let registry = sample();
        assert_eq!(codes(registry.all()), vec!["A5-1-1", "A6-6-1", "A5-2-2"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn looks_up_by_code() {
        let registry = sample();
        assert_eq!(registry.by_code("A6-6-1").map(Rule::severity), Some(Severity::Error));
        assert!(registry.by_code("M0-1-1").is_none());
    }

    #[test]
    fn groups_by_category_and_severity() {
        let registry = sample();
        assert_eq!(
            codes(registry.by_category("5. Expressions")),
            vec!["A5-1-1", "A5-2-2"]
        );
        assert_eq!(codes(registry.by_severity(Severity::Error)), vec!["A6-6-1"]);
        assert_eq!(
            registry.categories().into_iter().collect::<Vec<_>>(),
            vec!["5. Expressions", "6. Statements"]
        );
    }

    #[test]
    fn rejects_duplicate_codes() {
        let err = Registry::new(vec![
            rule("A5-1-1", Severity::Info, "a"),
            rule("A5-1-1", Severity::Error, "b"),
        ])
        .unwrap_err();
        assert!(matches!(err, RuleDefinitionError::DuplicateCode { ref code } if code == "A5-1-1"));
    }

    #[test]
    fn rejects_empty_codes() {
        let err = Registry::new(vec![rule("", Severity::Info, "a")]).unwrap_err();
        assert!(matches!(err, RuleDefinitionError::EmptyCode { index: 0 }));
    }

    #[test]
    fn merge_detects_cross_catalog_duplicates() {
        let other = Registry::new(vec![rule("A6-6-1", Severity::Info, "x")]).unwrap();
        assert!(sample().merge(other).is_err());

        let other = Registry::new(vec![rule("X-1", Severity::Info, "x")]).unwrap();
        let merged = sample().merge(other).unwrap();
        assert_eq!(merged.all().last().map(Rule::code), Some("X-1"));
    }

    #[test]
    fn filter_keeps_lookup_consistent() {
        let registry = sample().filter(|r| r.severity() >= Severity::Warning);
        assert_eq!(codes(registry.all()), vec!["A6-6-1", "A5-2-2"]);
        assert_eq!(registry.by_code("A5-2-2").map(Rule::code), Some("A5-2-2"));
        assert!(registry.by_code("A5-1-1").is_none());
    }

    #[test]
    fn configured_disables_and_overrides() {
        let config = Config::parse(
            r#"
[rules."A5-1-1"]
enabled = false

[rules."A5-2-2"]
severity = "error"

[rules.UNKNOWN]
enabled = true
"#,
        )
        .unwrap();

        let registry = sample().configured(&config);
        assert_eq!(codes(registry.all()), vec!["A6-6-1", "A5-2-2"]);
        assert_eq!(
            registry.by_code("A5-2-2").map(Rule::severity),
            Some(Severity::Error)
        );
        assert_eq!(
            registry.by_code("A6-6-1").map(Rule::severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn default_config_keeps_everything() {
        let registry = sample().configured(&Config::default());
        assert_eq!(codes(registry.all()), vec!["A5-1-1", "A6-6-1", "A5-2-2"]);
    }
}
