//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "autosar-lint.toml";

const DEFAULT_CONFIG: &str = r#"# autosar-lint configuration

# Rule subset of the built-in catalog: "strict" (all rules),
# "recommended" (warning and error) or "minimal" (error only)
preset = "strict"

# Lowest severity that makes `autosar-lint check` exit non-zero
fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/third_party/**",
]

# Extensions of C and C++ files to analyze
extensions = ["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx"]

# Respect .gitignore files
respect_gitignore = true

[engine]
# Backtracking budget per pattern match attempt
backtrack_limit = 1000000

# Extra rule catalogs, relative to this file
# rule_files = ["rules/project.toml"]

# Per-rule overrides, keyed by rule code
# [rules.A5-1-1]
# enabled = false

# [rules.A6-5-2]
# severity = "error"
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("."), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: autosar-lint check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosar_lint_core::{Config, Severity, DEFAULT_BACKTRACK_LIMIT};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses_to_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        let defaults = Config::default();

        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_threshold(), Severity::Error);
        assert_eq!(config.analyzer.exclude, defaults.analyzer.exclude);
        assert_eq!(config.analyzer.extensions, defaults.analyzer.extensions);
        assert_eq!(config.engine.backtrack_limit, DEFAULT_BACKTRACK_LIMIT);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), false).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "preset = \"minimal\"\n").unwrap();

        let err = write_config(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        write_config(dir.path(), true).unwrap();
        let content = std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(content, DEFAULT_CONFIG);
    }
}
