//! Interpreter control-flow tests.

use parley_script::{Interpreter, Notification, PendingOption, Severity, State, StopReason};

fn start(script: &str, conversation: &str) -> Interpreter {
    let mut interpreter = Interpreter::new().unwrap();
    interpreter.load(script).unwrap();
    interpreter.start_conversation(conversation).unwrap();
    interpreter
}

fn texts(interpreter: &mut Interpreter) -> Vec<String> {
    interpreter
        .take_notifications()
        .into_iter()
        .filter_map(|n| match n {
            Notification::TextChanged(text) => Some(text),
            _ => None,
        })
        .collect()
}

#[test]
fn intro_end_to_end() {
    let mut interpreter = start(
        "@conversation Intro\n@enter bob \"Bob\"\n@speak bob\nHello %bob!\n@option _ \"Bye\"\n",
        "Intro",
    );
    let shown: Vec<String> = interpreter
        .take_notifications()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        shown,
        [
            "optionsCleared()",
            "speakerChanged(\"Bob\")",
            "textChanged(\"Hello Bob!\")",
        ]
    );

    interpreter.next();
    assert_eq!(
        interpreter.pending_options(),
        [PendingOption {
            text: "Bye".into(),
            label: "_".into(),
        }]
    );
    interpreter.choose_option(0).unwrap();
    assert_eq!(interpreter.state(), State::Stopped(StopReason::Completed));
}

#[test]
fn next_without_a_cursor_is_false() {
    let mut interpreter = Interpreter::new().unwrap();
    assert!(!interpreter.next());
    interpreter.load("@conversation A\n").unwrap();
    assert!(!interpreter.next());
    interpreter.start_conversation("A").unwrap();
    assert_eq!(interpreter.state(), State::Stopped(StopReason::Completed));
    assert!(!interpreter.next());
}

#[test]
fn jump_return_pairs_restore_depth() {
    let script = "\
@conversation A
@jump sub
After one
@jump sub
After two
@jump end
@label sub
In sub
@return
@label end
";
    let mut interpreter = start(script, "A");
    let mut seen = texts(&mut interpreter);
    let mut depths = vec![interpreter.jump_depth()];
    while interpreter.next() {
        seen.extend(texts(&mut interpreter));
        depths.push(interpreter.jump_depth());
    }
    assert_eq!(seen, ["In sub", "After one", "In sub", "After two"]);
    assert_eq!(depths[..4], [1, 0, 1, 0]);
}

#[test]
fn labels_resolve_the_same_every_time() {
    let script = "\
@conversation A
@number n 0
@label top
@add n 1
Pass %n
@jumpgt top 3 n
Done
";
    let mut interpreter = start(script, "A");
    let mut seen = texts(&mut interpreter);
    while interpreter.next() {
        seen.extend(texts(&mut interpreter));
    }
    assert_eq!(seen, ["Pass 1", "Pass 2", "Pass 3", "Done"]);
}

#[test]
fn options_target_labels_without_pushing() {
    let script = "\
@conversation A
Choose
@option left \"Left\"
@option right \"Right\"
@label left
Went left
@return
@label right
Went right
";
    let mut interpreter = start(script, "A");
    interpreter.next();
    assert_eq!(interpreter.pending_options().len(), 2);
    interpreter.take_notifications();
    interpreter.choose_option(0).unwrap();
    assert_eq!(texts(&mut interpreter), ["Went left"]);
    assert_eq!(interpreter.jump_depth(), 0);

    interpreter.next();
    assert_eq!(texts(&mut interpreter), ["Went right"]);
}

#[test]
fn option_text_is_interpolated() {
    let mut interpreter = start(
        "@conversation A\n@number price 3\n@option _ \"Pay %price coins\"\n",
        "A",
    );
    assert!(interpreter.take_notifications().contains(&Notification::OptionAdded {
        index: 0,
        text: "Pay 3 coins".into(),
        label: "_".into(),
    }));
}

#[test]
fn escaped_percent_is_literal() {
    let mut interpreter = start(
        "@conversation A\n@enter bob \"Bob\"\n\\%bob is %bob, 100% sure\n",
        "A",
    );
    assert_eq!(texts(&mut interpreter), ["%bob is Bob, 100% sure"]);
}

#[test]
fn speak_accepts_a_literal_name() {
    let mut interpreter = start("@conversation A\n@speak \"A Voice\"\nBoo\n", "A");
    assert!(
        interpreter
            .take_notifications()
            .contains(&Notification::SpeakerChanged("A Voice".into()))
    );
}

#[test]
fn fatal_errors_halt_for_good() {
    let mut interpreter = start("@conversation A\n@number n 1\n@div n zero\nNever\n", "A");
    let notifications = interpreter.take_notifications();
    assert!(notifications.iter().any(|n| matches!(
        n,
        Notification::Error { severity: Severity::Fatal, message } if message.starts_with("@div Error")
    )));
    assert_eq!(interpreter.state(), State::Stopped(StopReason::Halted));
    assert!(!interpreter.next());
    assert!(interpreter.choose_option(0).is_err());
}

#[test]
fn leaving_the_conversation_clears_options() {
    let mut interpreter = start(
        "@conversation A\n@option _ \"Go\"\n@conversation B\nB text\n",
        "A",
    );
    interpreter.take_notifications();
    interpreter.choose_option(0).unwrap();
    assert_eq!(
        interpreter.take_notifications(),
        [Notification::OptionsCleared, Notification::OptionsCleared]
    );
    assert_eq!(
        interpreter.state(),
        State::Stopped(StopReason::ConversationEnded)
    );
}

#[test]
fn restarting_clears_the_jump_stack() {
    let mut interpreter = start("@conversation A\n@jump x\n@label x\nHi\n", "A");
    assert_eq!(interpreter.jump_depth(), 1);
    interpreter.start_conversation("A").unwrap();
    assert_eq!(interpreter.jump_depth(), 1);
    assert_eq!(interpreter.pc(), Some(3));
}
