//! # autosar-lint-rules
//!
//! The built-in AUTOSAR C++14 rule catalog.
//!
//! Rules are data: `rules/autosar-cpp14.toml` is embedded at compile time
//! and compiled into a [`Registry`] on demand. Each entry carries a code,
//! severity, category (numbered chapter of the guideline), pattern,
//! message, description and optional rationale and remediation.
//!
//! ## Usage
//!
//! ```ignore
//! use autosar_lint_rules::{builtin_registry, Preset};
//!
//! let all = builtin_registry()?;
//! let recommended = Preset::Recommended.registry(PatternOptions::default())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod presets;

pub use presets::{Preset, UnknownPresetError};

/// Re-export core types for convenience.
pub use autosar_lint_core::{CatalogError, PatternOptions, Registry, Rule, Severity, Violation};

/// TOML source of the built-in catalog.
pub const BUILTIN_CATALOG: &str = include_str!("../rules/autosar-cpp14.toml");

/// Compiles the built-in catalog with default pattern options.
///
/// # Errors
///
/// Returns an error if the embedded catalog is invalid.
pub fn builtin_registry() -> Result<Registry, CatalogError> {
    builtin_registry_with(PatternOptions::default())
}

/// Compiles the built-in catalog with `options` (e.g., a custom backtrack
/// limit).
///
/// # Errors
///
/// Returns an error if the embedded catalog is invalid.
pub fn builtin_registry_with(options: PatternOptions) -> Result<Registry, CatalogError> {
    let registry = autosar_lint_core::catalog::load_registry([BUILTIN_CATALOG], options)?;
    tracing::debug!(rules = registry.len(), "built-in catalog compiled");
    Ok(registry)
}
