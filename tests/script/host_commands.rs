//! Commands registered by the host take part in every phase.

use parley_foundation::Phase;
use parley_script::{
    ArgKind, ArgumentConstraint, CommandBehavior, CommandCatalog, CommandContract, CommandError,
    Interpreter, Notification, PreprocessContext, ResolveContext, State, ValidateContext,
};

/// `@wait <seconds>` raises an event and suspends.
struct Wait;

impl CommandBehavior for Wait {
    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        let seconds = ctx.number(ctx.argument(0)?)?;
        ctx.emit(Notification::DialogueEvent(format!("wait {seconds}")));
        ctx.suspend();
        Ok(())
    }
}

/// `@alias <id> <name>` renames a character at load time.
struct Alias;

impl CommandBehavior for Alias {
    fn preprocess(&self, ctx: &mut PreprocessContext<'_>) -> Result<(), CommandError> {
        let id = ctx.command.text(0).to_string();
        let name = ctx.command.text(1).to_string();
        let conversation = ctx.conversation_mut()?;
        match conversation.characters.get_mut(&id) {
            Some(existing) => {
                *existing = name;
                Ok(())
            }
            None => Err(CommandError::Custom(format!("Character ({id}) has not entered"))),
        }
    }
}

/// `@checkpoint <label>` only validates.
struct Checkpoint;

impl CommandBehavior for Checkpoint {
    fn validate(&self, ctx: &ValidateContext<'_>) -> Result<(), CommandError> {
        ctx.require_label(ctx.command.text(0))
    }
}

fn interpreter() -> Interpreter {
    let mut catalog = CommandCatalog::standard();
    catalog
        .register(
            CommandContract::new("wait", Wait)
                .with_description("Pause for a number of seconds")
                .with_argument(ArgumentConstraint::required([ArgKind::Number, ArgKind::Identifier])),
        )
        .unwrap();
    catalog
        .register(
            CommandContract::new("alias", Alias)
                .with_argument(ArgumentConstraint::required([ArgKind::Identifier]))
                .with_argument(ArgumentConstraint::required([ArgKind::String])),
        )
        .unwrap();
    catalog
        .register(
            CommandContract::new("checkpoint", Checkpoint)
                .with_argument(ArgumentConstraint::required([ArgKind::Identifier])),
        )
        .unwrap();
    Interpreter::with_catalog(catalog).unwrap()
}

#[test]
fn resolve_handlers_can_suspend() {
    let mut interpreter = interpreter();
    interpreter
        .load("@conversation A\n@number delay 2\n@wait delay\n@wait 0.5\nAfter\n")
        .unwrap();
    interpreter.start_conversation("A").unwrap();
    assert!(
        interpreter
            .take_notifications()
            .contains(&Notification::DialogueEvent("wait 2".into()))
    );
    assert_eq!(interpreter.state(), State::Suspended);

    interpreter.next();
    assert_eq!(
        interpreter.take_notifications(),
        [Notification::DialogueEvent("wait 0.5".into())]
    );
    interpreter.next();
    assert_eq!(
        interpreter.take_notifications(),
        [Notification::TextChanged("After".into())]
    );
}

#[test]
fn preprocess_handlers_shape_the_script() {
    let mut interpreter = interpreter();
    interpreter
        .load("@conversation A\n@enter bob\n@alias bob \"Robert\"\n@speak bob\nHi\n")
        .unwrap();
    interpreter.start_conversation("A").unwrap();
    assert_eq!(interpreter.character_name("bob"), Some("Robert"));
    assert!(
        interpreter
            .take_notifications()
            .contains(&Notification::SpeakerChanged("Robert".into()))
    );
}

#[test]
fn host_errors_become_diagnostics() {
    let mut interpreter = interpreter();
    let err = interpreter
        .load("@conversation A\n@alias ghost \"Ghost\"\n")
        .unwrap_err();
    let diagnostic = err.diagnostic().unwrap();
    assert_eq!(diagnostic.phase, Phase::Preprocess);
    assert_eq!(
        diagnostic.message,
        "@alias Error - Character (ghost) has not entered"
    );

    let err = interpreter
        .load("@conversation A\n@checkpoint nowhere\n")
        .unwrap_err();
    assert_eq!(err.diagnostic().unwrap().phase, Phase::Validate);
}

#[test]
fn host_argument_contracts_are_enforced() {
    let mut interpreter = interpreter();
    let err = interpreter
        .load("@conversation A\n@wait \"forever\"\n")
        .unwrap_err();
    assert_eq!(
        err.diagnostic().unwrap().message,
        "@wait Error - Invalid argument type [string] (forever). Expected [number or id]"
    );
}

#[test]
fn usage_lines() {
    let catalog = CommandCatalog::standard();
    let usage = |keyword: &str| catalog.find(keyword).unwrap().1.usage();
    assert_eq!(usage("enter"), "@enter <id> [string]");
    assert_eq!(usage("jumpeq"), "@jumpeq <id> <number|id> <number|id>");
    assert_eq!(usage("return"), "@return");
}
