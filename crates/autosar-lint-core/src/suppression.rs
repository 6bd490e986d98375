//! In-source suppression directives.
//!
//! A violation of rule `R` on line `N` is suppressed when line `N` carries a
//! same-line directive naming `R`, or line `N - 1` carries a next-line
//! directive naming `R`:
//!
//! ```text
//! x = 5; // autosar-disable-line A5-1-1
//! x = 5; /* autosar-disable-line A5-1-1 */
//! x = 5; // NOLINT(A5-1-1)
//! x = 5; // suppress-line: A5-1-1
//!
//! // autosar-disable-next-line A5-1-1
//! /* autosar-disable-next-line A5-1-1 */
//! // NOLINTNEXTLINE(A5-1-1)
//! // suppress-next-line: A5-1-1
//! x = 5;
//! ```
//!
//! Matching is a substring test on the rendered directive. The rule code
//! must appear verbatim and end there: a directive for `M0-1-10` does not
//! silence `M0-1-1`.

use crate::context::DocumentContext;

/// Which line a directive applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveScope {
    /// The line the directive is written on.
    SameLine,
    /// The line following the directive.
    NextLine,
}

/// Token family of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveSyntax {
    /// `// autosar-disable-line CODE`
    LineComment,
    /// `/* autosar-disable-line CODE */`
    BlockComment,
    /// `// NOLINT(CODE)`
    Nolint,
    /// `// suppress-line: CODE`
    Suppress,
}

impl DirectiveSyntax {
    /// Every recognized family.
    pub const ALL: [Self; 4] = [Self::LineComment, Self::BlockComment, Self::Nolint, Self::Suppress];
}

/// A directive silencing one rule code on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionDirective {
    /// Token family.
    pub syntax: DirectiveSyntax,
    /// Target line relative to the directive.
    pub scope: DirectiveScope,
    /// Rule code being silenced.
    pub code: String,
}

impl SuppressionDirective {
    /// Creates a directive.
    #[must_use]
    pub fn new(syntax: DirectiveSyntax, scope: DirectiveScope, code: impl Into<String>) -> Self {
        Self {
            syntax,
            scope,
            code: code.into(),
        }
    }

    /// All directives of `scope` that silence `code`.
    pub fn forms(code: &str, scope: DirectiveScope) -> impl Iterator<Item = Self> + '_ {
        DirectiveSyntax::ALL
            .into_iter()
            .map(move |syntax| Self::new(syntax, scope, code))
    }

    /// Renders the directive as it appears in source.
    #[must_use]
    pub fn render(&self) -> String {
        let code = &self.code;
        match (self.syntax, self.scope) {
            (DirectiveSyntax::LineComment, DirectiveScope::SameLine) => {
                format!("// autosar-disable-line {code}")
            }
            (DirectiveSyntax::LineComment, DirectiveScope::NextLine) => {
                format!("// autosar-disable-next-line {code}")
            }
            (DirectiveSyntax::BlockComment, DirectiveScope::SameLine) => {
                format!("/* autosar-disable-line {code} */")
            }
            (DirectiveSyntax::BlockComment, DirectiveScope::NextLine) => {
                format!("/* autosar-disable-next-line {code} */")
            }
            (DirectiveSyntax::Nolint, DirectiveScope::SameLine) => format!("// NOLINT({code})"),
            (DirectiveSyntax::Nolint, DirectiveScope::NextLine) => {
                format!("// NOLINTNEXTLINE({code})")
            }
            (DirectiveSyntax::Suppress, DirectiveScope::SameLine) => {
                format!("// suppress-line: {code}")
            }
            (DirectiveSyntax::Suppress, DirectiveScope::NextLine) => {
                format!("// suppress-next-line: {code}")
            }
        }
    }

    /// Returns true if the directive occurs in `line`.
    ///
    /// Forms ending in the code must not be followed by another code
    /// character, so `A5-1-10` does not silence `A5-1-1`.
    #[must_use]
    pub fn appears_in(&self, line: &str) -> bool {
        let token = self.render();
        let open_ended = token.ends_with(self.code.as_str());
        line.match_indices(token.as_str())
            .any(|(at, _)| !open_ended || !line[at + token.len()..].starts_with(is_code_char))
    }
}

fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Returns true if `code` is silenced given the text of the violation line
/// and of the line above it.
#[must_use]
pub fn is_line_suppressed(current: Option<&str>, previous: Option<&str>, code: &str) -> bool {
    let same_line = current.is_some_and(|text| {
        SuppressionDirective::forms(code, DirectiveScope::SameLine).any(|d| d.appears_in(text))
    });
    same_line
        || previous.is_some_and(|text| {
            SuppressionDirective::forms(code, DirectiveScope::NextLine).any(|d| d.appears_in(text))
        })
}

/// Returns true if a violation of `code` on 0-based `line` of `text` is
/// silenced by a directive.
#[must_use]
pub fn is_suppressed(text: &str, line: usize, code: &str) -> bool {
    let lines: Vec<&str> = text.split('\n').collect();
    let previous = line.checked_sub(1).and_then(|prev| lines.get(prev).copied());
    is_line_suppressed(lines.get(line).copied(), previous, code)
}

/// Like [`is_suppressed`], reusing the line index of an analysis pass.
#[must_use]
pub fn is_suppressed_in(ctx: &DocumentContext<'_>, line: usize, code: &str) -> bool {
    let previous = line.checked_sub(1).and_then(|prev| ctx.line_text(prev));
    is_line_suppressed(ctx.line_text(line), previous, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn same_line_forms_are_equivalent() {
        for directive in [
            "// autosar-disable-line A5-1-1",
            "/* autosar-disable-line A5-1-1 */",
            "// NOLINT(A5-1-1)",
            "// suppress-line: A5-1-1",
        ] {
            let text = format!("int x = 5; {directive}\n");
            assert!(is_suppressed(&text, 0, "A5-1-1"), "{directive}");
        }
    }

    #[test]
    fn next_line_forms_apply_to_following_line() {
        for directive in [
            "// autosar-disable-next-line A5-1-1",
            "/* autosar-disable-next-line A5-1-1 */",
            "// NOLINTNEXTLINE(A5-1-1)",
            "// suppress-next-line: A5-1-1",
        ] {
            let text = format!("{directive}\nint x = 5;\nint y = 6;");
            assert!(is_suppressed(&text, 1, "A5-1-1"), "{directive}");
            assert!(!is_suppressed(&text, 2, "A5-1-1"), "{directive}");
        }
    }

    #[test]
    fn next_line_directive_does_not_cover_its_own_line() {
        let text = "int x = 5; // autosar-disable-next-line A5-1-1";
        assert!(!is_suppressed(text, 0, "A5-1-1"));
    }

    #[test]
    fn same_line_directive_does_not_cover_next_line() {
        let text = "int a; // NOLINT(A5-1-1)\nint x = 5;";
        assert!(!is_suppressed(text, 1, "A5-1-1"));
    }

    #[test]
    fn other_codes_are_not_suppressed() {
        let text = "goto end; // autosar-disable-line A5-1-1";
        assert!(!is_suppressed(text, 0, "A6-6-1"));
    }

    #[test]
    fn longer_code_does_not_suppress_its_prefix() {
        for directive in [
            "// autosar-disable-line M0-1-10",
            "/* autosar-disable-line M0-1-10 */",
            "// NOLINT(M0-1-10)",
            "// suppress-line: M0-1-10",
        ] {
            let text = format!("return x; {directive}");
            assert!(!is_suppressed(&text, 0, "M0-1-1"), "{directive}");
            assert!(is_suppressed(&text, 0, "M0-1-10"), "{directive}");
        }
        for directive in [
            "// autosar-disable-next-line M0-1-10",
            "/* autosar-disable-next-line M0-1-10 */",
            "// NOLINTNEXTLINE(M0-1-10)",
            "// suppress-next-line: M0-1-10",
        ] {
            let text = format!("{directive}\nreturn x;");
            assert!(!is_suppressed(&text, 1, "M0-1-1"), "{directive}");
            assert!(is_suppressed(&text, 1, "M0-1-10"), "{directive}");
        }
    }

    #[test]
    fn code_may_be_followed_by_punctuation() {
        assert!(is_suppressed("goto x; // autosar-disable-line A6-6-1, see review", 0, "A6-6-1"));
        assert!(is_suppressed(
            "goto x; // suppress-line: A6-6-1 // suppress-line: A6-6-10",
            0,
            "A6-6-1"
        ));
    }

    #[test]
    fn first_line_has_no_previous_line() {
        assert!(!is_suppressed("goto end;", 0, "A6-6-1"));
        assert!(!is_suppressed("", 3, "A6-6-1"));
    }

    #[test]
    fn context_variant_agrees() {
        let text = "// suppress-next-line: A6-6-1\ngoto end;\ngoto end;";
        let ctx = DocumentContext::new(Path::new("a.cpp"), text);
        for line in 0..3 {
            assert_eq!(
                is_suppressed_in(&ctx, line, "A6-6-1"),
                is_suppressed(text, line, "A6-6-1")
            );
        }
        assert!(is_suppressed_in(&ctx, 1, "A6-6-1"));
    }

    #[test]
    fn renders_every_form() {
        let rendered: Vec<String> = SuppressionDirective::forms("M0-1-1", DirectiveScope::NextLine)
            .map(|d| d.render())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "// autosar-disable-next-line M0-1-1",
                "/* autosar-disable-next-line M0-1-1 */",
                "// NOLINTNEXTLINE(M0-1-1)",
                "// suppress-next-line: M0-1-1",
            ]
        );
    }
}
