//! # autosar-lint-core
//!
//! Pattern-based AUTOSAR C++14 checking engine.
//!
//! Rules are regular expressions with metadata, loaded from TOML catalogs
//! into an immutable [`Registry`]. For each document the engine:
//!
//! - detects comment spans ([`CommentIndex`])
//! - enumerates every rule's matches ([`find_matches`])
//! - drops matches starting inside a comment or silenced by a
//!   suppression directive ([`suppression`])
//! - publishes the surviving [`Violation`]s ([`Session`])
//!
//! The engine is textual: it does not parse C++, and string literals are
//! not distinguished from code.
//!
//! ## Example
//!
//! ```ignore
//! use autosar_lint_core::{catalog, PatternOptions, Session};
//! use std::sync::Arc;
//!
//! let registry = catalog::load_registry([CATALOG], PatternOptions::default())?;
//! let mut session = Session::new(Arc::new(registry));
//! session.subscribe(|path: &Path, violations: &[Violation]| {
//!     println!("{}: {} violations", path.display(), violations.len());
//! });
//! session.analyze("src/main.cpp", source);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod comments;
mod config;
mod context;
mod matcher;
mod registry;
mod rule;
mod session;
mod types;

/// Rule catalogs in TOML.
pub mod catalog;
pub mod fix;
pub mod snippet;
pub mod suppression;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use catalog::CatalogError;
pub use comments::{CommentIndex, CommentKind, CommentSpan};
pub use config::{
    has_extension, AnalyzerConfig, Config, ConfigError, EngineConfig, RuleConfig,
    DEFAULT_EXTENSIONS,
};
pub use context::{DocumentContext, LineIndex};
pub use matcher::{find_matches, MatchSpan, PatternEvaluationError};
pub use registry::{Registry, RuleDefinitionError};
pub use rule::{Pattern, PatternOptions, Rule, DEFAULT_BACKTRACK_LIMIT};
pub use session::{analyze_document, DocumentEvent, Session, ViolationListener};
pub use suppression::is_suppressed;
pub use types::{
    LintResult, Location, ParseSeverityError, Replacement, Severity, Suggestion, Violation,
    ViolationDiagnostic,
};

/// Generic remediation text for rules without a specific hint.
pub const GENERIC_REMEDIATION: &str = "Review the AUTOSAR C++14 guidelines for this rule and refactor the code to meet its requirements.";

/// Returns the rule's remediation hint, or [`GENERIC_REMEDIATION`].
#[must_use]
pub fn remediation_for(rule: &Rule) -> &str {
    rule.remediation().unwrap_or(GENERIC_REMEDIATION)
}
