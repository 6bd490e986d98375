//! Source excerpts around a violation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Lines shown on each side of the violation line.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// A snippet could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Renders `line` (0-based) of `content` with `context` lines either side.
///
/// Each output line is the 1-based line number right-aligned to width 4,
/// a marker (`→` on the violation line) and the line text.
#[must_use]
pub fn render_snippet(content: &str, line: usize, context: usize) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let first = line.saturating_sub(context);
    let last = line.saturating_add(context).min(lines.len() - 1);

    let mut out = String::new();
    for (i, text) in lines.iter().enumerate().take(last + 1).skip(first) {
        let marker = if i == line { '→' } else { ' ' };
        let _ = writeln!(out, "{:>4} {marker} {}", i + 1, text.trim_end_matches('\r'));
    }
    out
}

/// Reads `path` and renders the snippet around `line`.
///
/// # Errors
///
/// Returns [`SnippetError::Io`] if the file cannot be read.
pub fn read_snippet(path: &Path, line: usize) -> Result<String, SnippetError> {
    let content = std::fs::read_to_string(path).map_err(|e| SnippetError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(render_snippet(&content, line, DEFAULT_CONTEXT_LINES))
}
