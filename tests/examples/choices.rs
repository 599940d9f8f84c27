//! The tavern demo under arbitrary option choices.

use proptest::prelude::*;

use parley_script::{Interpreter, Notification, Severity, State, StopReason};

const TAVERN: &str = include_str!("../../demos/tavern.parley");

/// Plays the tavern, picking `choices` in turn and then always the last
/// option. Returns the final state and whether a fatal error was raised.
fn play(choices: &[usize]) -> (Interpreter, bool) {
    let mut interpreter = Interpreter::new().unwrap();
    interpreter.load(TAVERN).unwrap();
    interpreter.start_conversation("Tavern").unwrap();

    let mut fatal = false;
    let mut choices = choices.iter();
    for _ in 0..1_000 {
        fatal |= interpreter.take_notifications().iter().any(|n| {
            matches!(
                n,
                Notification::Error {
                    severity: Severity::Fatal,
                    ..
                }
            )
        });
        let pending = interpreter.pending_options().len();
        if pending == 0 {
            if !interpreter.next() {
                break;
            }
        } else {
            let index = choices.next().map_or(pending - 1, |c| c % pending);
            interpreter.choose_option(index).unwrap();
        }
    }
    (interpreter, fatal)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_route_leaves_the_tavern(choices in prop::collection::vec(0usize..3, 0..20)) {
        let (interpreter, fatal) = play(&choices);
        prop_assert!(!fatal);
        prop_assert_eq!(
            interpreter.state(),
            State::Stopped(StopReason::ConversationEnded)
        );

        let coins = interpreter.number("coins").unwrap();
        let ale = interpreter.number("ale").unwrap();
        prop_assert!(coins >= 0.0);
        prop_assert_eq!(coins + 3.0 * ale, 12.0);
    }
}
