//! Load pipeline tests: one phase-tagged diagnostic per failed load.

use parley_foundation::{ErrorKind, Phase};
use parley_script::{Interpreter, LoadConfig, State};

fn load_error(script: &str) -> parley_foundation::Diagnostic {
    let mut interpreter = Interpreter::new().unwrap();
    let err = interpreter.load(script).unwrap_err();
    match err.kind {
        ErrorKind::Load(diagnostic) => diagnostic,
        other => panic!("expected a load error, got {other:?}"),
    }
}

#[test]
fn parse_failures_come_first() {
    let diagnostic = load_error("@conversation A\n@jump nowhere\n@\n");
    assert_eq!(diagnostic.phase, Phase::Parse);
}

#[test]
fn preprocess_failures_come_before_validation() {
    let diagnostic = load_error("@conversation A\n@jump nowhere\n@label x extra\n");
    assert_eq!(diagnostic.phase, Phase::Preprocess);
    assert_eq!(
        diagnostic.message,
        "@label Error - Too many arguments. Expected at most 1"
    );
    assert_eq!(diagnostic.position.unwrap().line, 3);
}

#[test]
fn argument_expectations_are_named() {
    let cases = [
        ("@conversation", "Missing arguments. Expected [id]"),
        (
            "@conversation A\n@option top",
            "Missing arguments. Expected [string]",
        ),
        (
            "@conversation A\n@number n x y",
            "Too many arguments. Expected at most 2",
        ),
        (
            "@conversation A\n@enter bob 5",
            "Invalid argument type [number] (5). Expected [string]",
        ),
        (
            "@conversation A\n@add n \"many\"",
            "Invalid argument type [string] (many). Expected [number or id]",
        ),
    ];
    for (script, detail) in cases {
        let diagnostic = load_error(script);
        assert_eq!(diagnostic.phase, Phase::Preprocess, "{script}");
        assert!(diagnostic.message.ends_with(detail), "{script}: {}", diagnostic.message);
    }
}

#[test]
fn validation_checks_every_label_reference() {
    for script in [
        "@conversation A\n@jump missing",
        "@conversation A\n@jumpeq missing 1 1",
        "@conversation A\n@jumpgt missing 1 1",
        "@conversation A\n@option missing \"x\"",
    ] {
        let diagnostic = load_error(script);
        assert_eq!(diagnostic.phase, Phase::Validate, "{script}");
        assert!(diagnostic.message.contains("\"missing\""));
    }
}

#[test]
fn labels_must_belong_to_a_conversation() {
    let diagnostic = load_error("@label top\n@conversation A\n");
    assert_eq!(diagnostic.phase, Phase::Preprocess);
    assert!(diagnostic.message.contains("not part of a conversation"));
}

#[test]
fn strict_labels_reject_duplicates() {
    let script = "@conversation A\n@label x\n@label x\n";
    let mut lenient = Interpreter::new().unwrap();
    assert!(lenient.load(script).is_ok());

    let mut strict = Interpreter::new()
        .unwrap()
        .with_config(LoadConfig::default().with_strict_labels(true));
    assert!(strict.load(script).is_err());
}

#[test]
fn failed_load_keeps_the_running_conversation() {
    let mut interpreter = Interpreter::new().unwrap();
    interpreter.load("@conversation A\nOne\nTwo\n").unwrap();
    interpreter.start_conversation("A").unwrap();
    assert!(interpreter.load("@conversation B\n@jump x\n").is_err());
    assert_eq!(interpreter.state(), State::Suspended);
    assert!(interpreter.next());
    assert!(interpreter.script().unwrap().conversation("A").is_some());
}

#[test]
fn successful_load_resets_the_interpreter() {
    let mut interpreter = Interpreter::new().unwrap();
    interpreter.load("@conversation A\nOne\n").unwrap();
    interpreter.start_conversation("A").unwrap();
    interpreter.load("@conversation B\nTwo\n").unwrap();
    assert_eq!(interpreter.state(), State::Loaded);
    assert!(!interpreter.next());
    assert!(interpreter.pending_options().is_empty());
    assert!(interpreter.script().unwrap().conversation("A").is_none());
}

#[test]
fn windows_line_endings_load() {
    let mut interpreter = Interpreter::new().unwrap();
    interpreter
        .load("@conversation A\r\n@enter bob \"Bob\"\r\n@speak bob\r\nHi\r\n")
        .unwrap();
    let script = interpreter.script().unwrap();
    assert_eq!(script.commands().len(), 4);
}
