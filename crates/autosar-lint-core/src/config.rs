//! Configuration types for autosar-lint.

use crate::rule::{PatternOptions, DEFAULT_BACKTRACK_LIMIT};
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Extensions of C and C++ documents analyzed by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx"];

/// Top-level configuration for autosar-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use ("strict", "recommended", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity at or above which the run fails (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// File discovery settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Pattern engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Per-rule overrides keyed by rule code.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, code: &str) -> bool {
        self.rules.get(code).map_or(true, |c| c.enabled)
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, code: &str) -> Option<Severity> {
        self.rules.get(code).and_then(|c| c.severity)
    }

    /// Failure threshold, defaulting to [`Severity::Error`].
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// File discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// File extensions treated as C/C++ documents.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            extensions: default_extensions(),
            respect_gitignore: true,
        }
    }
}

/// Returns true if `path` ends in one of `extensions` (ASCII case-insensitive).
#[must_use]
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/build/**".to_string(), "**/third_party/**".to_string()]
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}

fn default_true() -> bool {
    true
}

/// Pattern engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Backtracking budget per match attempt.
    #[serde(default = "default_backtrack_limit")]
    pub backtrack_limit: usize,

    /// Extra rule catalogs loaded after the built-in one.
    #[serde(default)]
    pub rule_files: Vec<PathBuf>,
}

impl EngineConfig {
    /// Base compile options for catalog patterns.
    #[must_use]
    pub fn pattern_options(&self) -> PatternOptions {
        PatternOptions {
            backtrack_limit: self.backtrack_limit,
            ..PatternOptions::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backtrack_limit: default_backtrack_limit(),
            rule_files: Vec::new(),
        }
    }
}

fn default_backtrack_limit() -> usize {
    DEFAULT_BACKTRACK_LIMIT
}

/// Per-rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_accepts_cpp_sources() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_threshold(), Severity::Error);
        assert_eq!(config.engine.backtrack_limit, DEFAULT_BACKTRACK_LIMIT);

        for name in ["a.cpp", "b.HPP", "c.h", "d.cc", "e.c"] {
            assert!(has_extension(Path::new(name), &config.analyzer.extensions), "{name}");
        }
        for name in ["a.rs", "Makefile", "notes.txt"] {
            assert!(!has_extension(Path::new(name), &config.analyzer.extensions), "{name}");
        }
    }

    #[test]
    fn parses_full_config() {
        let toml = r#"
preset = "recommended"
fail_on = "warning"

[analyzer]
root = "./src"
exclude = ["**/generated/**"]
extensions = ["cpp", "ipp"]

[engine]
backtrack_limit = 5000
rule_files = ["rules/project.toml"]

[rules."A5-1-1"]
enabled = false

[rules."A7-1-5"]
severity = "error"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(config.fail_threshold(), Severity::Warning);
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert!(has_extension(Path::new("x.ipp"), &config.analyzer.extensions));
        assert!(!has_extension(Path::new("x.h"), &config.analyzer.extensions));
        assert_eq!(config.engine.pattern_options().backtrack_limit, 5000);
        assert_eq!(config.engine.rule_files, vec![PathBuf::from("rules/project.toml")]);

        assert!(!config.is_rule_enabled("A5-1-1"));
        assert!(config.is_rule_enabled("A7-1-5"));
        assert!(config.is_rule_enabled("M0-1-1"));
        assert_eq!(config.rule_severity("A7-1-5"), Some(Severity::Error));
    }

    #[test]
    fn analyzer_table_without_exclude_keeps_default_excludes() {
        let config = Config::parse("[analyzer]\nrespect_gitignore = false\n").unwrap();
        assert!(!config.analyzer.respect_gitignore);
        assert_eq!(config.analyzer.exclude, AnalyzerConfig::default().exclude);
        assert_eq!(config.analyzer.exclude, vec!["**/build/**", "**/third_party/**"]);

        let config = Config::parse("[analyzer]\nexclude = []\n").unwrap();
        assert!(config.analyzer.exclude.is_empty());
    }

    #[test]
    fn rejects_unknown_severity() {
        let err = Config::parse("fail_on = \"fatal\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/autosar-lint.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
