//! Check command implementation.

use anyhow::{Context, Result};
use autosar_lint_core::{Analyzer, Severity};
use autosar_lint_rules::Preset;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::Settings;
use crate::OutputFormat;

/// Exit code when a failing violation is reported.
const EXIT_VIOLATIONS: i32 = 1;

/// Exit code when the rule registry cannot be built.
const EXIT_REGISTRY: i32 = 2;

/// Options of `autosar-lint check`.
pub struct CheckArgs {
    pub path: Option<PathBuf>,
    pub format: OutputFormat,
    pub exclude: Vec<String>,
    pub preset: Option<Preset>,
    pub fail_on: Option<Severity>,
    pub config: Option<PathBuf>,
}

/// Runs the check command.
pub fn run(args: &CheckArgs) -> Result<()> {
    let project_dir = args.path.as_deref().unwrap_or_else(|| Path::new("."));
    let settings = Settings::load(project_dir, args.config.as_deref())?;

    let registry = match settings
        .preset(args.preset)
        .and_then(|preset| settings.effective_registry(preset))
    {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            eprintln!("Error: {e:?}");
            std::process::exit(EXIT_REGISTRY);
        }
    };

    let mut builder = Analyzer::builder()
        .registry(Arc::clone(&registry))
        .excludes(args.exclude.iter().cloned());
    if let Some(path) = &args.path {
        builder = builder.root(path);
    }
    let analyzer = builder
        .config(&settings.config.analyzer)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, &registry, args.format)?;

    let threshold = args.fail_on.unwrap_or_else(|| settings.config.fail_threshold());
    if result.has_violations_at(threshold) {
        std::process::exit(EXIT_VIOLATIONS);
    }

    Ok(())
}
