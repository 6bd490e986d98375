//! Shared output formatting for lint results.

use anyhow::Result;
use autosar_lint_core::{remediation_for, LintResult, Registry, Severity, ViolationDiagnostic};
use miette::{NamedSource, Report};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, registry: &Registry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Pretty => print_pretty(result, registry),
    }
    Ok(())
}

fn colored(severity: Severity, text: &str) -> String {
    let color = match severity {
        Severity::Error => "\x1b[31m",
        Severity::Warning => "\x1b[33m",
        Severity::Info => "\x1b[34m",
    };
    format!("{color}{text}\x1b[0m")
}

/// Violations grouped by risk (highest first), then a summary line.
pub fn render_text(result: &LintResult) -> String {
    let mut out = String::new();

    for severity in Severity::ALL {
        let group = result.by_severity(severity);
        if group.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            "{} ({})\n",
            colored(severity, severity.risk_label()),
            group.len()
        );
        for violation in group {
            let _ = writeln!(out, "{}", violation.format());
        }
    }

    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    let _ = writeln!(
        out,
        "{summary_color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m",
        result.files_checked
    );
    if result.files_skipped > 0 {
        let _ = writeln!(out, "Skipped {} unreadable file(s)", result.files_skipped);
    }
    out
}

/// One `file:line:col: severity [CODE] message` line per violation.
pub fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|v| format!("{v}\n"))
        .collect()
}

fn print_pretty(result: &LintResult, registry: &Registry) {
    // Files are read once each; violations are already grouped by file.
    let mut sources: BTreeMap<&Path, Option<String>> = BTreeMap::new();

    for violation in &result.violations {
        let path = violation.location.file.as_path();
        let content = sources
            .entry(path)
            .or_insert_with(|| match std::fs::read_to_string(path) {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::warn!("Cannot show source for {}: {e}", path.display());
                    None
                }
            });

        let mut diagnostic = ViolationDiagnostic::from(violation);
        if let Some(rule) = registry.by_code(&violation.code) {
            diagnostic = diagnostic.with_help(remediation_for(rule));
        }

        match content {
            Some(content) => {
                let report = Report::new(diagnostic).with_source_code(NamedSource::new(
                    path.display().to_string(),
                    content.clone(),
                ));
                println!("{report:?}");
            }
            None => println!("{violation}"),
        }
    }

    let (errors, warnings, infos) = result.count_by_severity();
    println!(
        "Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)",
        result.files_checked
    );
}
