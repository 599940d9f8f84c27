//! The tavern demo: options, arithmetic, subroutines, and a second
//! conversation.
//!
//! See demos/tavern.parley for the script.

use parley_script::{Interpreter, Notification, State, StopReason};

const TAVERN: &str = include_str!("../../demos/tavern.parley");

fn tavern() -> Interpreter {
    let mut interpreter = Interpreter::new().unwrap();
    interpreter.load(TAVERN).unwrap();
    interpreter.start_conversation("Tavern").unwrap();
    interpreter
}

/// Drains notifications into `speaker: text` lines and option labels.
fn transcript(interpreter: &mut Interpreter) -> Vec<String> {
    let mut speaker = String::new();
    let mut lines = Vec::new();
    for notification in interpreter.take_notifications() {
        match notification {
            Notification::SpeakerChanged(name) => speaker = name,
            Notification::TextChanged(text) => lines.push(format!("{speaker}: {text}")),
            Notification::OptionAdded { index, text, .. } => {
                lines.push(format!("{}) {text}", index + 1));
            }
            Notification::DialogueEvent(name) => lines.push(format!("<{name}>")),
            _ => {}
        }
    }
    lines
}

#[test]
fn loads_both_conversations() {
    let interpreter = tavern();
    let script = interpreter.script().unwrap();
    assert_eq!(script.conversations().len(), 2);
    let tavern = script.conversation("Tavern").unwrap();
    assert_eq!(
        tavern.characters.get("keeper").map(String::as_str),
        Some("Old Marta")
    );
    assert_eq!(tavern.characters.get("guard").map(String::as_str), Some("guard"));
    let street = script.conversation("Street").unwrap();
    assert_eq!(
        street.characters.get("guard").map(String::as_str),
        Some("Captain Reyes")
    );
}

#[test]
fn greeting_and_menu() {
    let mut interpreter = tavern();
    assert_eq!(
        transcript(&mut interpreter),
        ["Old Marta: Welcome, traveller. You look like someone with 12 coins to spend."]
    );
    interpreter.next();
    assert_eq!(
        transcript(&mut interpreter),
        [
            "1) Buy an ale (3 coins)",
            "2) Ask about the guard",
            "3) Leave"
        ]
    );
}

#[test]
fn buying_drinks() {
    let mut interpreter = tavern();
    interpreter.next();
    interpreter.take_notifications();

    interpreter.choose_option(0).unwrap();
    assert_eq!(
        transcript(&mut interpreter),
        ["Old Marta: Here you go. That's 1 so far."]
    );
    assert_eq!(interpreter.number("coins"), Some(9.0));

    interpreter.next();
    assert_eq!(
        transcript(&mut interpreter),
        ["Old Marta: Welcome, traveller. You look like someone with 9 coins to spend."]
    );
}

#[test]
fn too_poor_to_drink() {
    let mut interpreter = tavern();
    interpreter.set_number("coins", 2.0).unwrap();
    interpreter.next();
    interpreter.take_notifications();

    interpreter.choose_option(0).unwrap();
    assert_eq!(
        transcript(&mut interpreter),
        ["Old Marta: You can't pay for that."]
    );
    assert_eq!(interpreter.number("ale"), Some(0.0));
}

#[test]
fn gossip_visits_a_subroutine() {
    let mut interpreter = tavern();
    interpreter.next();
    interpreter.take_notifications();

    interpreter.choose_option(1).unwrap();
    assert_eq!(
        transcript(&mut interpreter),
        ["guard: I heard that. Keep your voice down."]
    );
    assert_eq!(interpreter.jump_depth(), 1);

    interpreter.next();
    assert_eq!(transcript(&mut interpreter), ["Old Marta: Anything else?"]);
    assert_eq!(interpreter.jump_depth(), 0);
}

#[test]
fn leaving_ends_at_the_next_conversation() {
    let mut interpreter = tavern();
    interpreter.next();
    interpreter.take_notifications();

    interpreter.choose_option(2).unwrap();
    assert_eq!(transcript(&mut interpreter), ["Old Marta: Safe roads, then."]);
    interpreter.next();
    assert_eq!(transcript(&mut interpreter), ["<tavern_left>"]);
    assert_eq!(
        interpreter.state(),
        State::Stopped(StopReason::ConversationEnded)
    );

    interpreter.start_conversation("Street").unwrap();
    assert_eq!(
        transcript(&mut interpreter),
        ["Captain Reyes: Move along."]
    );
}
