//! The counting demo: a loop built from labels and conditional jumps.
//!
//! See demos/counting.parley for the script.

use parley_script::{Interpreter, Notification, State, StopReason};

const COUNTING: &str = include_str!("../../demos/counting.parley");

#[test]
fn counts_to_three_then_scales() {
    let mut interpreter = Interpreter::new().unwrap();
    interpreter.load(COUNTING).unwrap();
    interpreter.start_conversation("Count").unwrap();

    let mut lines = Vec::new();
    loop {
        lines.extend(
            interpreter
                .take_notifications()
                .into_iter()
                .filter_map(|n| match n {
                    Notification::TextChanged(text) => Some(text),
                    _ => None,
                }),
        );
        if !interpreter.next() {
            break;
        }
    }

    assert_eq!(lines, ["Counting 1", "Counting 2", "Counting 3", "Done at 30."]);
    assert_eq!(interpreter.number("n"), Some(30.0));
    assert_eq!(interpreter.state(), State::Stopped(StopReason::Completed));
}

#[test]
fn checks_clean() {
    let mut interpreter = Interpreter::new().unwrap();
    let outcome = interpreter.parse(COUNTING);
    assert!(outcome.complete);
    interpreter.load(COUNTING).unwrap();
    assert_eq!(interpreter.script().unwrap().commands().len(), 10);
}
