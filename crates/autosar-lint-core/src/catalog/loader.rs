//! DTO → [`Rule`] conversion with validation.

use super::dto::{RuleCatalogDto, RuleDto};
use crate::registry::RuleDefinitionError;
use crate::rule::{Pattern, PatternOptions, Rule};
use crate::types::Severity;

/// Converts a catalog DTO into compiled rules, in file order.
///
/// # Errors
///
/// Returns the first definition error encountered; no rules are returned
/// in that case.
pub fn load(dto: RuleCatalogDto, options: PatternOptions) -> Result<Vec<Rule>, RuleDefinitionError> {
    dto.rules
        .into_iter()
        .enumerate()
        .map(|(i, rule)| convert_rule(rule, i, options))
        .collect()
}

fn convert_rule(
    dto: RuleDto,
    index: usize,
    options: PatternOptions,
) -> Result<Rule, RuleDefinitionError> {
    if dto.code.trim().is_empty() {
        return Err(RuleDefinitionError::EmptyCode { index });
    }

    let severity: Severity =
        dto.severity
            .parse()
            .map_err(|_| RuleDefinitionError::UnknownSeverity {
                code: dto.code.clone(),
                value: dto.severity.clone(),
            })?;

    let options = PatternOptions {
        dot_matches_newline: dto.dot_matches_newline,
        ..options
    };
    let pattern =
        Pattern::compile(&dto.pattern, options).map_err(|e| RuleDefinitionError::InvalidPattern {
            code: dto.code.clone(),
            source: Box::new(e),
        })?;

    let mut rule = Rule::new(dto.code, severity, dto.category, pattern, dto.message)
        .with_description(dto.description);
    if let Some(rationale) = dto.rationale {
        rule = rule.with_rationale(rationale);
    }
    if let Some(remediation) = dto.remediation {
        rule = rule.with_remediation(remediation);
    }
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(code: &str, severity: &str, pattern: &str) -> RuleDto {
        RuleDto {
            code: code.to_string(),
            severity: severity.to_string(),
            category: "6. Statements".to_string(),
            pattern: pattern.to_string(),
            dot_matches_newline: false,
            message: "msg".to_string(),
            description: String::new(),
            rationale: None,
            remediation: Some("fix it".to_string()),
        }
    }

    fn catalog(rules: Vec<RuleDto>) -> RuleCatalogDto {
        RuleCatalogDto { rules }
    }

    #[test]
    fn converts_valid_rules() {
        let rules = load(
            catalog(vec![dto("A6-6-1", "error", r"\bgoto\b")]),
            PatternOptions::default(),
        )
        .unwrap();
        assert_eq!(rules[0].code(), "A6-6-1");
        assert_eq!(rules[0].severity(), Severity::Error);
        assert_eq!(rules[0].remediation(), Some("fix it"));
    }

    #[test]
    fn unknown_severity_names_the_rule() {
        let err = load(
            catalog(vec![dto("A6-6-1", "fatal", r"\bgoto\b")]),
            PatternOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "A6-6-1: unknown severity `fatal`, expected: error, warning, info"
        );
    }

    #[test]
    fn malformed_pattern_names_the_rule() {
        let err = load(
            catalog(vec![
                dto("A6-6-1", "error", r"\bgoto\b"),
                dto("X-1", "info", r"(unclosed"),
            ]),
            PatternOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RuleDefinitionError::InvalidPattern { ref code, .. } if code == "X-1"));
    }

    #[test]
    fn blank_code_is_rejected() {
        let err = load(catalog(vec![dto("  ", "info", "x")]), PatternOptions::default())
            .unwrap_err();
        assert!(matches!(err, RuleDefinitionError::EmptyCode { index: 0 }));
    }

    #[test]
    fn dot_matches_newline_is_per_rule() {
        let mut multi = dto("M-1", "info", "a.b");
        multi.dot_matches_newline = true;
        let rules = load(catalog(vec![multi]), PatternOptions::default()).unwrap();
        assert!(rules[0].pattern().options().dot_matches_newline);
    }
}
