//! Rule presets for common configurations.

use crate::builtin_registry_with;
use autosar_lint_core::{CatalogError, PatternOptions, Registry, Severity};
use std::str::FromStr;

/// Subsets of the built-in catalog, selected by minimum severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every rule.
    #[default]
    Strict,
    /// Warning and error rules.
    Recommended,
    /// Error rules only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// All presets.
    pub const ALL: [Self; 3] = [Self::Strict, Self::Recommended, Self::Minimal];

    /// Configuration name of the preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Recommended => "recommended",
            Self::Minimal => "minimal",
        }
    }

    /// Lowest severity kept by the preset.
    #[must_use]
    pub fn min_severity(self) -> Severity {
        match self {
            Self::Strict => Severity::Info,
            Self::Recommended => Severity::Warning,
            Self::Minimal => Severity::Error,
        }
    }

    /// Narrows `registry` to this preset, preserving order.
    #[must_use]
    pub fn apply(self, registry: Registry) -> Registry {
        let min = self.min_severity();
        registry.filter(|rule| rule.severity() >= min)
    }

    /// Compiles the built-in catalog narrowed to this preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog is invalid.
    pub fn registry(self, options: PatternOptions) -> Result<Registry, CatalogError> {
        Ok(self.apply(builtin_registry_with(options)?))
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unrecognized preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset `{0}`, expected: strict, recommended, minimal")]
pub struct UnknownPresetError(pub String);

impl FromStr for Preset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPresetError(s.to_string()))
    }
}
