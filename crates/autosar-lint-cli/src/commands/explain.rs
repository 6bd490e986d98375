//! Explain command implementation.

use anyhow::{bail, Result};
use autosar_lint_core::suppression::{DirectiveScope, SuppressionDirective};
use autosar_lint_core::{remediation_for, Rule};
use std::fmt::Write as _;
use std::path::Path;

use super::Settings;

/// Runs the explain command. Disabled rules are still explained.
pub fn run(config: Option<&Path>, code: &str) -> Result<()> {
    let settings = Settings::load(Path::new("."), config)?;
    let registry = settings.catalog_registry()?;
    let code = code.trim();

    let Some(rule) = registry
        .by_code(code)
        .or_else(|| registry.all().iter().find(|r| r.code().eq_ignore_ascii_case(code)))
    else {
        bail!("Unknown rule code: {code}. Run `autosar-lint list-rules` to see all codes.");
    };

    print!("{}", render(rule));
    Ok(())
}

fn render(rule: &Rule) -> String {
    let mut out = String::new();
    let severity = rule.severity();

    let _ = writeln!(out, "{} ({severity}, {})", rule.code(), severity.risk_label());
    let _ = writeln!(out, "Category: {}", rule.category());
    let _ = writeln!(out, "Message:  {}", rule.message());
    if !rule.description().is_empty() {
        let _ = writeln!(out, "Detects:  {}", rule.description());
    }
    let _ = writeln!(out, "Pattern:  {}", rule.pattern().as_str());

    if let Some(rationale) = rule.rationale() {
        let _ = writeln!(out, "\nRationale:\n  {rationale}");
    }
    let _ = writeln!(out, "\nRemediation:\n  {}", remediation_for(rule));

    for (title, scope) in [
        ("Suppress on the same line with any of", DirectiveScope::SameLine),
        ("Suppress from the line above with any of", DirectiveScope::NextLine),
    ] {
        let _ = writeln!(out, "\n{title}:");
        for directive in SuppressionDirective::forms(rule.code(), scope) {
            let _ = writeln!(out, "  {}", directive.render());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosar_lint_core::GENERIC_REMEDIATION;
    use autosar_lint_rules::builtin_registry;

    #[test]
    fn explains_rule_with_directives() {
        let registry = builtin_registry().unwrap();
        let out = render(registry.by_code("A6-6-1").unwrap());

        assert!(out.starts_with("A6-6-1 (error, High Risk)\nCategory: 6. Statements\n"));
        assert!(out.contains("Pattern:  \\bgoto\\b"));
        assert!(out.contains("Rationale:\n  goto makes control flow hard to follow"));
        assert!(out.contains("Remediation:\n  Replace goto with structured control flow"));
        for directive in [
            "// autosar-disable-line A6-6-1",
            "/* autosar-disable-line A6-6-1 */",
            "// NOLINT(A6-6-1)",
            "// suppress-line: A6-6-1",
            "// autosar-disable-next-line A6-6-1",
            "// NOLINTNEXTLINE(A6-6-1)",
            "// suppress-next-line: A6-6-1",
        ] {
            assert!(out.contains(directive), "missing {directive}");
        }
    }

    #[test]
    fn falls_back_to_generic_remediation() {
        let registry = builtin_registry().unwrap();
        let rule = registry
            .all()
            .iter()
            .find(|r| r.remediation().is_none())
            .unwrap();
        assert!(render(rule).contains(GENERIC_REMEDIATION));
    }
}
