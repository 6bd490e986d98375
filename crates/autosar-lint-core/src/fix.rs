//! Quick-fix edits that silence a violation with a suppression directive.

use crate::context::DocumentContext;
use crate::suppression::{DirectiveScope, DirectiveSyntax, SuppressionDirective};
use crate::types::{Location, Replacement, Suggestion, Violation};

/// Edit appending ` // autosar-disable-line CODE` to the violation line.
///
/// Returns `None` if the line already carries a same-line directive for
/// the code, or if the line does not exist in `content`.
#[must_use]
pub fn suppress_on_line(content: &str, violation: &Violation) -> Option<Suggestion> {
    let ctx = DocumentContext::new(&violation.location.file, content);
    let line = violation.location.line;
    let text = ctx.line_text(line)?;
    let code = &violation.code;

    if SuppressionDirective::forms(code, DirectiveScope::SameLine).any(|d| d.appears_in(text)) {
        return None;
    }

    let body = text.trim_end_matches('\r');
    let offset = ctx.offset_for(line, 0) + body.len();
    let location = Location::new(violation.location.file.clone(), line, body.chars().count())
        .with_span(offset, 0);
    let directive =
        SuppressionDirective::new(DirectiveSyntax::LineComment, DirectiveScope::SameLine, code.as_str());

    Some(Suggestion::with_fix(
        format!("Suppress {code} on this line"),
        Replacement::new(location, format!(" {}", directive.render())),
    ))
}

/// Edit inserting `<indent>// autosar-disable-next-line CODE` above the
/// violation line, indented like it.
///
/// Returns `None` if the previous line already carries a next-line
/// directive for the code, or if the line does not exist in `content`.
#[must_use]
pub fn suppress_on_previous_line(content: &str, violation: &Violation) -> Option<Suggestion> {
    let ctx = DocumentContext::new(&violation.location.file, content);
    let line = violation.location.line;
    let text = ctx.line_text(line)?;
    let code = &violation.code;

    let already = line
        .checked_sub(1)
        .and_then(|prev| ctx.line_text(prev))
        .is_some_and(|prev| {
            SuppressionDirective::forms(code, DirectiveScope::NextLine).any(|d| d.appears_in(prev))
        });
    if already {
        return None;
    }

    let indent = &text[..text.len() - text.trim_start().len()];
    let offset = ctx.offset_for(line, 0);
    let location = Location::new(violation.location.file.clone(), line, 0).with_span(offset, 0);
    let directive =
        SuppressionDirective::new(DirectiveSyntax::LineComment, DirectiveScope::NextLine, code.as_str());

    Some(Suggestion::with_fix(
        format!("Suppress {code} on next line"),
        Replacement::new(location, format!("{indent}{}\n", directive.render())),
    ))
}

/// All applicable suppression edits, previous-line form first.
#[must_use]
pub fn suppression_fixes(content: &str, violation: &Violation) -> Vec<Suggestion> {
    suppress_on_previous_line(content, violation)
        .into_iter()
        .chain(suppress_on_line(content, violation))
        .collect()
}
