//! Subcommand implementations and the configuration plumbing they share.

pub mod check;
pub mod explain;
pub mod init;
pub mod list_rules;
pub mod output;

use anyhow::{Context, Result};
use autosar_lint_core::{catalog, Config, PatternOptions, Registry};
use autosar_lint_rules::{builtin_registry_with, Preset};
use std::path::{Path, PathBuf};

use crate::config_resolver::{self, ConfigSource};

/// Loaded configuration together with where it came from.
pub struct Settings {
    /// Parsed configuration (defaults if no file was found).
    pub config: Config,
    /// Where `config` was read from.
    pub source: ConfigSource,
}

impl Settings {
    /// Resolves and loads the configuration for `project_dir`.
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let source = config_resolver::resolve(project_dir, explicit);
        let config = match source.path() {
            None => Config::default(),
            Some(p) => {
                if source.is_global() {
                    tracing::info!("Using global config: {}", p.display());
                }
                Config::from_file(p)
                    .with_context(|| format!("Failed to load config: {}", p.display()))?
            }
        };
        Ok(Self { config, source })
    }

    /// Preset from `override_preset`, else from the configuration, else strict.
    pub fn preset(&self, override_preset: Option<Preset>) -> Result<Preset> {
        if let Some(preset) = override_preset {
            return Ok(preset);
        }
        match self.config.preset.as_deref() {
            Some(name) => name.parse().context("Invalid `preset` in configuration"),
            None => Ok(Preset::default()),
        }
    }

    fn pattern_options(&self) -> PatternOptions {
        self.config.engine.pattern_options()
    }

    /// Extra catalogs, relative paths taken from the config file's directory.
    fn rule_files(&self) -> Vec<PathBuf> {
        let base = self
            .source
            .path()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.config
            .engine
            .rule_files
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { base.join(p) })
            .collect()
    }

    /// Registry of the user catalogs only.
    fn user_registry(&self) -> Result<Registry> {
        let mut rules = Vec::new();
        for path in self.rule_files() {
            let loaded = catalog::load_rules_from_file(&path, self.pattern_options())
                .with_context(|| format!("Failed to load rule catalog: {}", path.display()))?;
            tracing::debug!("Loaded {} rules from {}", loaded.len(), path.display());
            rules.extend(loaded);
        }
        Ok(Registry::new(rules)?)
    }

    /// Every known rule: the built-in catalog followed by the user catalogs,
    /// without preset or per-rule configuration applied.
    pub fn catalog_registry(&self) -> Result<Registry> {
        let builtin = builtin_registry_with(self.pattern_options())
            .context("Failed to compile the built-in catalog")?;
        Ok(builtin.merge(self.user_registry()?)?)
    }

    /// Rules a check runs: the preset's subset of the built-in catalog, the
    /// user catalogs, then `[rules]` overrides.
    pub fn effective_registry(&self, preset: Preset) -> Result<Registry> {
        let builtin = builtin_registry_with(self.pattern_options())
            .context("Failed to compile the built-in catalog")?;
        let registry = preset.apply(builtin).merge(self.user_registry()?)?;
        Ok(registry.configured(&self.config))
    }
}
