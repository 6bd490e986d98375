//! Per-document analysis context.

use crate::comments::CommentIndex;
use std::ops::Range;
use std::path::Path;

/// Maps byte offsets to 0-based `(line, column)` positions.
///
/// Lines are separated by `\n`; columns count characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Builds the index for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Number of lines (a trailing newline opens an empty last line).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the 0-based line containing `offset`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Byte range of `line`, excluding its terminating newline.
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.len, |next| next - 1);
        Some(start..end)
    }
}

/// Context for one analysis pass over one document.
///
/// Built once per pass: the line index and comment index are shared by
/// every rule evaluated against the document.
#[derive(Debug, Clone)]
pub struct DocumentContext<'a> {
    /// Path of the document.
    pub path: &'a Path,
    /// Full document text.
    pub content: &'a str,
    lines: LineIndex,
    comments: CommentIndex,
}

impl<'a> DocumentContext<'a> {
    /// Creates a new document context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            content,
            lines: LineIndex::new(content),
            comments: CommentIndex::detect(content),
        }
    }

    /// Offset to line index.
    #[must_use]
    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Detected comment spans.
    #[must_use]
    pub fn comments(&self) -> &CommentIndex {
        &self.comments
    }

    /// Translates a byte offset to a 0-based `(line, column)` pair.
    ///
    /// `offset` must lie on a character boundary.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.lines.line_of(offset);
        let line_start = self.lines.line_range(line).map_or(0, |r| r.start);
        let column = self
            .content
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());
        (line, column)
    }

    /// Text of `line` without its newline, or `None` past the end.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let range = self.lines.line_range(line)?;
        self.content.get(range)
    }

    /// Calculates the byte offset for a 0-based line and character column.
    ///
    /// Columns past the end of the line clamp to the line end; lines past
    /// the end of the document clamp to the document end.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        let Some(range) = self.lines.line_range(line) else {
            return self.content.len();
        };
        let text = &self.content[range.clone()];
        text.char_indices()
            .nth(column)
            .map_or(range.end, |(i, _)| range.start + i)
    }
}
