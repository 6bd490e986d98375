//! List rules command implementation.

use anyhow::Result;
use autosar_lint_core::{Registry, Severity};
use std::fmt::Write as _;
use std::path::Path;

use super::Settings;

/// Runs the list-rules command against the effective registry.
pub fn run(config: Option<&Path>, category: Option<&str>, severity: Option<Severity>) -> Result<()> {
    let settings = Settings::load(Path::new("."), config)?;
    let registry = settings.effective_registry(settings.preset(None)?)?;
    print!("{}", render(&registry, category, severity));
    Ok(())
}

fn render(registry: &Registry, category: Option<&str>, severity: Option<Severity>) -> String {
    let mut out = String::new();
    let rules: Vec<_> = registry
        .all()
        .iter()
        .filter(|r| category.map_or(true, |c| r.category() == c))
        .filter(|r| severity.map_or(true, |s| r.severity() == s))
        .collect();

    let _ = writeln!(out, "Available rules ({} of {}):\n", rules.len(), registry.len());
    let _ = writeln!(out, "{:<10} {:<8} {:<28} Message", "Code", "Severity", "Category");
    let _ = writeln!(out, "{}", "-".repeat(100));
    for rule in &rules {
        let _ = writeln!(
            out,
            "{:<10} {:<8} {:<28} {}",
            rule.code(),
            rule.severity().to_string(),
            rule.category(),
            rule.message()
        );
    }

    let _ = writeln!(out, "\nCategories:");
    for name in registry.categories() {
        let _ = writeln!(out, "  {name} ({})", registry.by_category(name).count());
    }

    let _ = writeln!(out, "\nUse `autosar-lint explain <CODE>` for details, e.g.:");
    let _ = writeln!(out, "  autosar-lint explain A5-1-1");
    out
}
