//! Listeners, host accessors, and snapshots.

use std::cell::RefCell;
use std::rc::Rc;

use parley_foundation::ErrorKind;
use parley_script::{Interpreter, Notification, NotificationKind, Snapshot};

const SCRIPT: &str = "\
@conversation Shop
@enter clerk \"Clerk\"
@number gold 10
@speak clerk
You have %gold gold.
@event shop_closed
Bye, %clerk.
";

fn loaded() -> Interpreter {
    let mut interpreter = Interpreter::new().unwrap();
    interpreter.load(SCRIPT).unwrap();
    interpreter
}

#[test]
fn listeners_see_notifications_in_order() {
    let mut interpreter = loaded();
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in [
        NotificationKind::SpeakerChanged,
        NotificationKind::TextChanged,
        NotificationKind::DialogueEvent,
    ] {
        let log = Rc::clone(&log);
        interpreter
            .events_mut()
            .register(kind, move |n| log.borrow_mut().push(n.to_string()));
    }

    interpreter.start_conversation("Shop").unwrap();
    interpreter.next();
    assert_eq!(
        *log.borrow(),
        [
            "speakerChanged(\"Clerk\")",
            "textChanged(\"You have 10 gold.\")",
            "dialogueEvent(\"shop_closed\")",
            "textChanged(\"Bye, Clerk.\")",
        ]
    );
}

#[test]
fn once_listeners_and_unregister() {
    let mut interpreter = loaded();
    let count = Rc::new(RefCell::new(0));
    let once = Rc::clone(&count);
    interpreter
        .events_mut()
        .register_once(NotificationKind::TextChanged, move |_| *once.borrow_mut() += 1);
    let removed = interpreter
        .events_mut()
        .register(NotificationKind::TextChanged, |_| panic!("unregistered"));
    assert!(interpreter.events_mut().unregister(removed));

    interpreter.start_conversation("Shop").unwrap();
    interpreter.next();
    assert_eq!(*count.borrow(), 1);
    assert_eq!(
        interpreter
            .events_mut()
            .listener_count(NotificationKind::TextChanged),
        0
    );
}

#[test]
fn host_values_feed_interpolation() {
    let mut interpreter = loaded();
    interpreter.start_conversation("Shop").unwrap();
    interpreter.set_number("gold", 99.0).unwrap();
    assert!(interpreter.set_character_name("clerk", "Ada").unwrap());
    interpreter.take_notifications();
    interpreter.next();
    assert!(
        interpreter
            .take_notifications()
            .contains(&Notification::TextChanged("Bye, Ada.".into()))
    );
    assert_eq!(interpreter.number("gold"), Some(99.0));
}

#[test]
fn accessors_need_an_active_conversation() {
    let mut interpreter = loaded();
    assert!(matches!(
        interpreter.set_number("gold", 1.0).unwrap_err().kind,
        ErrorKind::NoActiveConversation
    ));
    assert!(interpreter.number("gold").is_none());
    assert!(interpreter.snapshot().is_err());
}

#[test]
fn snapshots_carry_state_between_sessions() {
    let mut first = loaded();
    first.start_conversation("Shop").unwrap();
    first.set_number("gold", 4.0).unwrap();
    first.set_character_name("clerk", "Ada").unwrap();
    let snapshot = first.snapshot().unwrap();
    assert_eq!(snapshot.conversation, "Shop");

    let mut second = loaded();
    second.restore(&snapshot).unwrap();
    second.start_conversation("Shop").unwrap();
    assert_eq!(second.character_name("clerk"), Some("Ada"));
    // @number runs again on start.
    assert_eq!(second.number("gold"), Some(10.0));
}

#[test]
fn restore_needs_a_known_conversation() {
    let mut interpreter = Interpreter::new().unwrap();
    let snapshot = Snapshot {
        conversation: "Shop".into(),
        ..Snapshot::default()
    };
    assert!(matches!(
        interpreter.restore(&snapshot).unwrap_err().kind,
        ErrorKind::NoScript
    ));
    interpreter.load("@conversation Other\n").unwrap();
    assert!(matches!(
        interpreter.restore(&snapshot).unwrap_err().kind,
        ErrorKind::UnknownConversation(_)
    ));
}
