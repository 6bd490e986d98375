//! End-to-end behavior of the engine on small documents.

use autosar_lint_core::catalog::load_registry;
use autosar_lint_core::{
    analyze_document, is_suppressed, DocumentEvent, PatternOptions, Registry, Session, Severity,
    Violation,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

const CATALOG: &str = include_str!("fixtures/rules.toml");
const SAMPLE: &str = include_str!("fixtures/sample.cpp");

fn registry() -> Registry {
    load_registry([CATALOG], PatternOptions::default()).unwrap()
}

fn analyze(text: &str) -> Vec<Violation> {
    analyze_document(&registry(), Path::new("test.cpp"), text)
}

fn summary(violations: &[Violation]) -> Vec<(String, usize, usize)> {
    violations
        .iter()
        .map(|v| (v.code.clone(), v.location.line, v.location.column))
        .collect()
}

#[test]
fn literal_initialization_scenario() {
    let found = analyze("int x = 5;\nint y = x;");
    assert_eq!(summary(&found), vec![("A5-1-1".to_string(), 0, 6)]);

    let found = analyze("int x = 5; // autosar-disable-line A5-1-1\nint y = x;");
    assert!(found.is_empty());
}

#[test]
fn next_line_directive_scenario() {
    let found = analyze("// autosar-disable-next-line A5-1-1\nint x = 5;");
    assert!(found.is_empty());
}

#[test]
fn comment_exclusion_scenario() {
    assert!(analyze("/* foo(1); */").is_empty());
    assert_eq!(summary(&analyze("foo(1);")), vec![("M0-3-2".to_string(), 0, 0)]);
}

#[test]
fn goto_scenario() {
    let found = analyze("goto cleanup;");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Error);
}

#[test]
fn legacy_directives_are_equivalent() {
    for directive in ["// NOLINT(A6-6-1)", "// suppress-line: A6-6-1"] {
        let text = format!("goto cleanup; {directive}");
        assert!(analyze(&text).is_empty(), "{directive}");
        assert!(is_suppressed(&text, 0, "A6-6-1"));
    }
}

#[test]
fn directive_for_other_rule_does_not_suppress() {
    let found = analyze("goto cleanup; // NOLINT(A5-1-1)");
    assert_eq!(found.len(), 1);
}

#[test]
fn string_literals_can_hide_code() {
    // `//` inside the literal opens a comment for the rest of the line.
    let found = analyze("const char* u = \"http://x\"; goto end;");
    assert!(found.iter().all(|v| v.code != "A6-6-1"));
}

#[test]
fn fixture_document() {
    let found = analyze_document(&registry(), Path::new("sample.cpp"), SAMPLE);
    assert_eq!(
        summary(&found),
        vec![
            ("A6-6-1".to_string(), 7, 8),
            ("A5-1-1".to_string(), 4, 14),
            ("A3-8-1".to_string(), 11, 4),
        ]
    );
}

#[test]
fn session_follows_document_lifecycle() {
    let published: Rc<RefCell<Vec<(PathBuf, Vec<String>)>>> = Rc::default();
    let sink = Rc::clone(&published);

    let mut session = Session::new(Arc::new(registry()));
    session.subscribe(move |path: &Path, violations: &[Violation]| {
        let codes = violations.iter().map(|v| v.code.clone()).collect();
        sink.borrow_mut().push((path.to_path_buf(), codes));
    });

    let path = PathBuf::from("src/main.cpp");
    session.handle(DocumentEvent::Opened {
        path: path.clone(),
        text: "goto a;".to_string(),
    });
    session.handle(DocumentEvent::SetPaused(true));
    session.handle(DocumentEvent::Changed {
        path: path.clone(),
        text: "int x = 5;".to_string(),
    });
    assert_eq!(session.violations(&path)[0].code, "A6-6-1");

    session.handle(DocumentEvent::RerunAll);
    assert_eq!(session.violations(&path)[0].code, "A5-1-1");

    session.handle(DocumentEvent::Closed { path: path.clone() });
    assert_eq!(session.total(), 0);

    assert_eq!(
        *published.borrow(),
        vec![
            (path.clone(), vec!["A6-6-1".to_string()]),
            (path.clone(), vec!["A5-1-1".to_string()]),
            (path, Vec::new()),
        ]
    );
}
