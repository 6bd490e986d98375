//! Rule catalogs: rules as TOML data.
//!
//! # Pipeline
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! RuleCatalogDto
//!   ↓ validate + compile patterns
//! Vec<Rule>
//!   ↓ duplicate check
//! Registry
//! ```
//!
//! Loading is all-or-nothing: any invalid rule fails the whole registry.

use crate::registry::{Registry, RuleDefinitionError};
use crate::rule::{PatternOptions, Rule};
use std::path::{Path, PathBuf};

pub mod dto;
pub mod loader;

/// Errors from parsing a catalog and building rules.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read rule catalog {}: {source}", path.display())]
    Io {
        /// Catalog path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A rule definition is invalid.
    #[error("{0}")]
    Definition(#[from] RuleDefinitionError),
}

/// Parses one catalog into rules, in file order.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or any rule is invalid.
pub fn load_rules_from_toml(content: &str, options: PatternOptions) -> Result<Vec<Rule>, CatalogError> {
    let dto: dto::RuleCatalogDto = toml::from_str(content)?;
    Ok(loader::load(dto, options)?)
}

/// Reads and parses a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content is invalid.
pub fn load_rules_from_file(path: &Path, options: PatternOptions) -> Result<Vec<Rule>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_rules_from_toml(&content, options)
}

/// Builds a registry from catalogs, registered in the order given.
///
/// # Errors
///
/// Returns the first parse or definition error, including duplicate codes
/// across catalogs.
pub fn load_registry<'a>(
    catalogs: impl IntoIterator<Item = &'a str>,
    options: PatternOptions,
) -> Result<Registry, CatalogError> {
    let mut rules = Vec::new();
    for content in catalogs {
        rules.extend(load_rules_from_toml(content, options)?);
    }
    let registry = Registry::new(rules)?;
    tracing::debug!(rules = registry.len(), "rule registry loaded");
    Ok(registry)
}
