//! Diagnostics for scripts the grammar cannot consume.

use parley_foundation::Phase;
use parley_grammar::{Grammar, parse_program};

#[test]
fn bare_marker_at_end_of_script() {
    let outcome = parse_program(&Grammar::core(), "Hello\n@");
    assert!(!outcome.complete);
    assert_eq!(outcome.end, 6);
    let diagnostic = outcome.first_diagnostic().unwrap();
    assert_eq!(diagnostic.phase, Phase::Parse);
    let position = diagnostic.position.unwrap();
    assert_eq!((position.line, position.column), (2, 2));
    assert!(diagnostic.message.starts_with("unexpected"));
    assert!(diagnostic.message.contains("expected one of"));
}

#[test]
fn bare_marker_mid_script_names_the_line_end() {
    let outcome = parse_program(&Grammar::core(), "@\nHello");
    assert!(!outcome.complete);
    assert_eq!(outcome.end, 0);
    let diagnostic = outcome.first_diagnostic().unwrap();
    assert!(diagnostic.message.starts_with("unexpected"));
}

#[test]
fn valid_scripts_have_no_diagnostics() {
    let outcome = parse_program(&Grammar::core(), "@a\n\n  text\n// c\n@b 1 2 \"x\"\n");
    assert!(outcome.complete);
    assert!(outcome.diagnostics.is_empty());
    assert!(outcome.first_diagnostic().is_none());
}

#[test]
fn diagnostics_display_with_phase_and_position() {
    let outcome = parse_program(&Grammar::core(), "Fine\n  @");
    let shown = outcome.first_diagnostic().unwrap().to_string();
    assert!(shown.starts_with("[Parse] 2:"), "{shown}");
}
