//! File-system analysis: discovers C/C++ sources under a root directory and
//! runs every rule of a registry over each of them.

use crate::config::{has_extension, AnalyzerConfig, DEFAULT_EXTENSIONS};
use crate::registry::Registry;
use crate::session::analyze_document;
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Root directory does not exist.
    #[error("Root directory not found: {}", path.display())]
    RootNotFound {
        /// The missing root.
        path: PathBuf,
    },

    /// Directory walk failed.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    registry: Option<Arc<Registry>>,
    exclude_patterns: Vec<String>,
    extensions: Option<Vec<String>>,
    respect_gitignore: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the rule registry.
    #[must_use]
    pub fn registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the extensions of analyzed files.
    #[must_use]
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Sets whether `.gitignore` files are honored (default: true).
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = Some(respect);
        self
    }

    /// Applies `[analyzer]` settings not already set on the builder.
    #[must_use]
    pub fn config(mut self, config: &AnalyzerConfig) -> Self {
        if self.root.is_none() {
            self.root = Some(config.root.clone());
        }
        self.exclude_patterns.extend(config.exclude.iter().cloned());
        if self.extensions.is_none() {
            self.extensions = Some(config.extensions.clone());
        }
        if self.respect_gitignore.is_none() {
            self.respect_gitignore = Some(config.respect_gitignore);
        }
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory doesn't exist or an exclude
    /// pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };
        if !root.is_dir() {
            return Err(AnalyzerError::RootNotFound { path: root });
        }

        let excludes = self
            .exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            registry: self.registry.unwrap_or_default(),
            excludes,
            extensions: self
                .extensions
                .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()),
            respect_gitignore: self.respect_gitignore.unwrap_or(true),
        })
    }
}

/// Runs a registry over every C/C++ file below a root directory.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    registry: Arc<Registry>,
    excludes: Vec<glob::Pattern>,
    extensions: Vec<String>,
    respect_gitignore: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.registry.len()
    }

    /// Analyzes all discovered files.
    ///
    /// Files that cannot be read are logged and counted in
    /// [`LintResult::files_skipped`].
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for path in &files {
            match self.analyze_file(path) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    result.files_skipped += 1;
                }
            }
        }

        info!(
            "Analysis complete: {} violations in {} files ({} skipped)",
            result.violations.len(),
            result.files_checked,
            result.files_skipped
        );

        Ok(result)
    }

    /// Reads and analyzes a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(analyze_document(&self.registry, path, &content))
    }

    /// Lists the files [`analyze`](Self::analyze) would visit, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory walk fails.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if !has_extension(path, &self.extensions) {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path matches an exclude pattern, either as given or
    /// relative to the root.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.excludes
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Pattern, PatternOptions, Rule};
    use crate::types::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn goto_registry() -> Arc<Registry> {
        let rule = Rule::new(
            "A6-6-1",
            Severity::Error,
            "6. Statements",
            Pattern::compile(r"\bgoto\b", PatternOptions::default()).unwrap(),
            "The goto statement shall not be used",
        );
        Arc::new(Registry::new(vec![rule]).unwrap())
    }

    fn write(dir: &Path, rel: &str, content: &[u8]) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn builder_rejects_missing_root() {
        let err = Analyzer::builder()
            .root("/nonexistent/autosar-lint-root")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, AnalyzerError::RootNotFound { .. }));
    }

    #[test]
    fn builder_rejects_bad_glob() {
        let dir = TempDir::new().unwrap();
        let result = Analyzer::builder().root(dir.path()).exclude("a/[").build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn discovers_only_cpp_sources_outside_excludes() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/main.cpp", b"int main() {}");
        write(dir.path(), "include/util.hpp", b"");
        write(dir.path(), "README.md", b"goto");
        write(dir.path(), "build/gen/out.cpp", b"goto x;");

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .exclude("**/build/**")
            .build()
            .unwrap();
        let files: Vec<PathBuf> = analyzer
            .discover_files()
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(analyzer.root()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            files,
            vec![PathBuf::from("include/util.hpp"), PathBuf::from("src/main.cpp")]
        );
    }

    #[test]
    fn honors_gitignore_when_configured() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".gitignore", b"generated/\n");
        write(dir.path(), "generated/a.cpp", b"");
        write(dir.path(), "b.cpp", b"");

        let analyzer = Analyzer::builder().root(dir.path()).build().unwrap();
        assert_eq!(analyzer.discover_files().unwrap().len(), 1);

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .respect_gitignore(false)
            .build()
            .unwrap();
        assert_eq!(analyzer.discover_files().unwrap().len(), 2);
    }

    #[test]
    fn analyze_collects_violations_and_skips_unreadable() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.cpp", b"void f() {\n  goto done;\ndone:\n  return;\n}\n");
        write(dir.path(), "b.cpp", b"// goto is fine in comments\n");
        write(dir.path(), "c.cpp", &[0xff, 0xfe, 0x00]);

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .registry(goto_registry())
            .build()
            .unwrap();
        let result = analyzer.analyze().unwrap();

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.files_skipped, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location.line, 1);
        assert!(result.has_errors());
    }

    #[test]
    fn config_supplies_defaults() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.ino", b"goto x;");
        write(dir.path(), "b.cpp", b"goto x;");

        let config = AnalyzerConfig {
            root: dir.path().to_path_buf(),
            exclude: Vec::new(),
            extensions: vec!["ino".to_string()],
            respect_gitignore: true,
        };
        let analyzer = Analyzer::builder()
            .registry(goto_registry())
            .config(&config)
            .build()
            .unwrap();
        assert_eq!(analyzer.rule_count(), 1);
        let result = analyzer.analyze().unwrap();
        assert_eq!(result.files_checked, 1);
        assert!(result.violations[0].location.file.ends_with("a.ino"));
    }
}
