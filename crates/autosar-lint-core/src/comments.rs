//! Comment span detection for C-family sources.
//!
//! Two independent scans run over the text:
//!
//! - line comments: `//` through the end of the line
//! - block comments: `/*` through the nearest following `*/` (no nesting)
//!
//! Their spans are merged into an ordered, non-overlapping list. String
//! literals are not tracked, so `"http://host"` opens a line comment.

/// Kind of comment a span was detected as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...` up to the end of the line.
    Line,
    /// `/* ... */`.
    Block,
}

/// Byte range `[start, end)` occupied by a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan {
    /// First byte of the comment opener.
    pub start: usize,
    /// One past the last byte of the comment.
    pub end: usize,
    /// Comment grammar that produced the span.
    pub kind: CommentKind,
}

impl CommentSpan {
    /// Returns true if `offset` lies inside the span.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Ordered, non-overlapping comment spans of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentIndex {
    spans: Vec<CommentSpan>,
    open_at_eof: bool,
}

impl CommentIndex {
    /// Scans `text` for line and block comments.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let mut spans = line_comments(text);
        let line_open = spans.last().is_some_and(|s| s.end == text.len());
        let (blocks, block_open) = block_comments(text);
        spans.extend(blocks);
        spans.sort_by_key(|s| (s.start, s.end));

        let mut merged: Vec<CommentSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if span.start < last.end => {
                    last.end = last.end.max(span.end);
                }
                _ => merged.push(span),
            }
        }

        Self {
            spans: merged,
            open_at_eof: line_open || block_open,
        }
    }

    /// Returns the merged spans in ascending order.
    #[must_use]
    pub fn spans(&self) -> &[CommentSpan] {
        &self.spans
    }

    /// Returns true if `offset` falls inside any comment.
    ///
    /// The end of the document counts as inside when the last comment runs
    /// up to it unterminated, so an empty match there is still in-comment.
    #[must_use]
    pub fn is_position_in_comment(&self, offset: usize) -> bool {
        let idx = self.spans.partition_point(|s| s.end <= offset);
        if self.spans.get(idx).is_some_and(|s| s.contains(offset)) {
            return true;
        }
        self.open_at_eof && self.spans.last().is_some_and(|s| s.end == offset)
    }

    /// Number of spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if the document has no comments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

fn line_comments(text: &str) -> Vec<CommentSpan> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(found) = text[pos..].find("//") {
        let start = pos + found;
        let end = text[start..].find('\n').map_or(text.len(), |nl| start + nl);
        spans.push(CommentSpan {
            start,
            end,
            kind: CommentKind::Line,
        });
        pos = end;
    }
    spans
}

/// Block spans, plus whether the last one is left unterminated.
fn block_comments(text: &str) -> (Vec<CommentSpan>, bool) {
    let mut spans = Vec::new();
    let mut open = false;
    let mut pos = 0;
    while let Some(found) = text[pos..].find("/*") {
        let start = pos + found;
        // An unterminated block runs to the end of the document.
        let end = match text[start + 2..].find("*/") {
            Some(close) => start + 2 + close + 2,
            None => {
                open = true;
                text.len()
            }
        };
        spans.push(CommentSpan {
            start,
            end,
            kind: CommentKind::Block,
        });
        pos = end;
    }
    (spans, open)
}
