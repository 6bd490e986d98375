//! Pattern matching of a single rule over a document.

use crate::rule::Rule;

/// One occurrence of a rule pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// Capture groups `1..`; `None` for groups that did not participate.
    pub captured_groups: Vec<Option<String>>,
}

impl MatchSpan {
    /// Length of the match in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for zero-length matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A rule pattern could not be evaluated against a document.
///
/// Scoped to one rule within one pass; the pass continues without it.
#[derive(Debug, thiserror::Error)]
#[error("rule {code}: pattern evaluation failed at byte {offset}: {source}")]
pub struct PatternEvaluationError {
    /// Code of the failing rule.
    pub code: String,
    /// Search position where the engine gave up.
    pub offset: usize,
    /// Underlying engine error (e.g., backtrack limit exceeded).
    #[source]
    pub source: fancy_regex::Error,
}

/// Enumerates all non-overlapping matches of `rule` in `text`, left to right.
///
/// After a match the search resumes at its end; a zero-length match
/// advances by one character so the scan always terminates.
///
/// # Errors
///
/// Returns [`PatternEvaluationError`] if the engine fails on any search
/// step. Partial results are discarded.
pub fn find_matches(rule: &Rule, text: &str) -> Result<Vec<MatchSpan>, PatternEvaluationError> {
    let regex = rule.pattern().regex();
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let captures = regex
            .captures_from_pos(text, pos)
            .map_err(|source| PatternEvaluationError {
                code: rule.code().to_string(),
                offset: pos,
                source,
            })?;
        let Some(captures) = captures else {
            break;
        };
        let Some(whole) = captures.get(0) else {
            break;
        };

        let captured_groups = (1..captures.len())
            .map(|i| captures.get(i).map(|m| m.as_str().to_string()))
            .collect();
        spans.push(MatchSpan {
            start: whole.start(),
            end: whole.end(),
            captured_groups,
        });

        pos = if whole.end() > whole.start() {
            whole.end()
        } else {
            next_char_boundary(text, whole.end())
        };
    }

    Ok(spans)
}

fn next_char_boundary(text: &str, offset: usize) -> usize {
    text[offset..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| offset + c.len_utf8())
}
