//! Diagnostic aggregation.
//!
//! [`analyze_document`] runs one pass over one document: every rule in
//! registry order, matches inside comments or silenced by a suppression
//! directive dropped. [`Session`] owns the per-document violation table,
//! the pause flag and the listeners notified after every pass.
//!
//! Sessions are single-threaded. A pass runs to completion before
//! [`Session::handle`] returns and its result replaces the previous set
//! for that document wholesale.

use crate::config::{has_extension, DEFAULT_EXTENSIONS};
use crate::context::DocumentContext;
use crate::matcher::find_matches;
use crate::registry::Registry;
use crate::rule::Rule;
use crate::suppression::is_suppressed_in;
use crate::types::{Location, Severity, Violation};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Analyzes one document against every rule of `registry`.
///
/// Violations are ordered by registry order, then by match order. A rule
/// whose pattern fails to evaluate contributes nothing; the failure is
/// logged and the remaining rules still run.
#[must_use]
pub fn analyze_document(registry: &Registry, path: &Path, text: &str) -> Vec<Violation> {
    let ctx = DocumentContext::new(path, text);
    let mut violations = Vec::new();
    for rule in registry.all() {
        check_rule(rule, &ctx, &mut violations);
    }
    violations
}

fn check_rule(rule: &Rule, ctx: &DocumentContext<'_>, out: &mut Vec<Violation>) {
    let spans = match find_matches(rule, ctx.content) {
        Ok(spans) => spans,
        Err(e) => {
            tracing::warn!(path = %ctx.path.display(), "{e}");
            return;
        }
    };

    let before = out.len();
    for span in &spans {
        if ctx.comments().is_position_in_comment(span.start) {
            continue;
        }
        let (line, column) = ctx.position(span.start);
        if is_suppressed_in(ctx, line, rule.code()) {
            tracing::debug!(code = rule.code(), line, "match suppressed by directive");
            continue;
        }
        out.push(Violation::new(
            rule.code(),
            rule.severity(),
            rule.category(),
            Location::new(ctx.path.to_path_buf(), line, column).with_span(span.start, span.len()),
            rule.message(),
        ));
    }

    if !spans.is_empty() {
        tracing::debug!(
            code = rule.code(),
            matches = spans.len(),
            reported = out.len() - before,
            "rule evaluated"
        );
    }
}

/// Input events driving a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// A document was opened with the given text.
    Opened {
        /// Document path.
        path: PathBuf,
        /// Full text.
        text: String,
    },
    /// An open document's text changed.
    Changed {
        /// Document path.
        path: PathBuf,
        /// Full new text.
        text: String,
    },
    /// A document was closed.
    Closed {
        /// Document path.
        path: PathBuf,
    },
    /// Pauses or resumes analysis.
    SetPaused(bool),
    /// Clears the pause flag and re-analyzes every open document.
    RerunAll,
}

/// Receives a document's new violation set after every completed pass.
///
/// An empty slice means the document has no violations (or was closed).
pub trait ViolationListener {
    /// Called once per completed pass.
    fn violations_changed(&mut self, path: &Path, violations: &[Violation]);
}

impl<F> ViolationListener for F
where
    F: FnMut(&Path, &[Violation]),
{
    fn violations_changed(&mut self, path: &Path, violations: &[Violation]) {
        self(path, violations);
    }
}

/// Owner of the per-document analysis state.
pub struct Session {
    registry: Arc<Registry>,
    extensions: Vec<String>,
    documents: BTreeMap<PathBuf, Vec<Violation>>,
    open: BTreeMap<PathBuf, String>,
    paused: bool,
    listeners: Vec<Box<dyn ViolationListener>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("rules", &self.registry.len())
            .field("documents", &self.documents.len())
            .field("open", &self.open.len())
            .field("paused", &self.paused)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Session {
    /// Creates a session analyzing C/C++ documents with `registry`.
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            documents: BTreeMap::new(),
            open: BTreeMap::new(),
            paused: false,
            listeners: Vec::new(),
        }
    }

    /// Replaces the set of document extensions that are analyzed.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Registers a listener for violation changes.
    pub fn subscribe(&mut self, listener: impl ViolationListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies one event.
    pub fn handle(&mut self, event: DocumentEvent) {
        match event {
            DocumentEvent::Opened { path, text } | DocumentEvent::Changed { path, text } => {
                self.analyze(path, text);
            }
            DocumentEvent::Closed { path } => self.close(&path),
            DocumentEvent::SetPaused(paused) => self.set_paused(paused),
            DocumentEvent::RerunAll => {
                let paths: Vec<PathBuf> = self.open.keys().cloned().collect();
                self.rerun_all(&paths);
            }
        }
    }

    /// Records the latest text of `path` and runs a pass unless paused.
    ///
    /// Documents without a C/C++ extension are ignored.
    pub fn analyze(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        let path = path.into();
        if !has_extension(&path, &self.extensions) {
            tracing::debug!(path = %path.display(), "not a C/C++ document, skipped");
            return;
        }
        self.open.insert(path.clone(), text.into());
        if self.paused {
            tracing::debug!(path = %path.display(), "analysis paused");
            return;
        }
        self.run_pass(&path);
    }

    /// Sets the pause flag. While paused, passes are skipped and the last
    /// published sets stay in place.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        tracing::info!(paused, "analysis pause toggled");
    }

    /// Returns true while analysis is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Clears the pause flag and runs a fresh pass over each of `paths`
    /// that has known text.
    pub fn rerun_all(&mut self, paths: &[PathBuf]) {
        self.paused = false;
        for path in paths {
            if self.open.contains_key(path) {
                self.run_pass(path);
            } else {
                tracing::debug!(path = %path.display(), "no text recorded, rerun skipped");
            }
        }
    }

    /// Forgets `path` and notifies listeners with an empty set.
    pub fn close(&mut self, path: &Path) {
        self.open.remove(path);
        self.publish(path, Vec::new());
    }

    fn run_pass(&mut self, path: &Path) {
        let Some(text) = self.open.get(path) else {
            return;
        };
        let violations = analyze_document(&self.registry, path, text);
        tracing::info!(
            path = %path.display(),
            violations = violations.len(),
            "analysis pass complete"
        );
        self.publish(path, violations);
    }

    fn publish(&mut self, path: &Path, violations: Vec<Violation>) {
        for listener in &mut self.listeners {
            listener.violations_changed(path, &violations);
        }
        if violations.is_empty() {
            self.documents.remove(path);
        } else {
            self.documents.insert(path.to_path_buf(), violations);
        }
    }

    /// The shared rule registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Looks up a rule by code.
    #[must_use]
    pub fn rule(&self, code: &str) -> Option<&Rule> {
        self.registry.by_code(code)
    }

    /// Paths of documents whose text is known.
    pub fn open_documents(&self) -> impl Iterator<Item = &Path> {
        self.open.keys().map(PathBuf::as_path)
    }

    /// Current violations of `path` (empty if none).
    #[must_use]
    pub fn violations(&self, path: &Path) -> &[Violation] {
        self.documents
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All current violations, in path order then canonical order.
    pub fn all_violations(&self) -> impl Iterator<Item = &Violation> {
        self.documents.values().flatten()
    }

    /// Violations of one category across all documents.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Violation> {
        self.all_violations()
            .filter(|v| v.category == category)
            .collect()
    }

    /// Violations of one severity across all documents.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.all_violations()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Categories that currently have violations.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<&str> {
        self.all_violations().map(|v| v.category.as_str()).collect()
    }

    /// Violation count per category.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for v in self.all_violations() {
            *counts.entry(v.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Total number of current violations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }
}
