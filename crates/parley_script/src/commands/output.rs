//! Commands that produce player-visible output.

use parley_foundation::TokenKind;

use crate::context::ResolveContext;
use crate::contract::{ArgKind, ArgumentConstraint, CommandBehavior, CommandContract};
use crate::error::CommandError;
use crate::events::Notification;

/// `@speak <id | "Name">`
pub struct SpeakCommand;

impl CommandBehavior for SpeakCommand {
    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        let command = ctx.command()?;
        let Some(speaker) = command.argument(0) else {
            return Ok(());
        };
        let entered = if speaker.kind == TokenKind::String {
            Some(speaker.text.clone())
        } else {
            ctx.conversation()?.characters.get(&speaker.text).cloned()
        };
        let name = entered.unwrap_or_else(|| {
            ctx.warn(format!(
                "Character ({}) has not entered this conversation",
                speaker.text
            ));
            speaker.text.clone()
        });
        ctx.emit(Notification::SpeakerChanged(name));
        Ok(())
    }
}

/// A line of dialogue. Written as a plain text line, never with `@`.
pub struct TextCommand;

impl CommandBehavior for TextCommand {
    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        let command = ctx.command()?;
        let text = ctx.interpolate(command.text(0))?;
        ctx.emit(Notification::TextChanged(text));
        ctx.suspend();
        Ok(())
    }
}

/// `@event <id | "name">`
pub struct EventCommand;

impl CommandBehavior for EventCommand {
    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        let name = ctx.command()?.text(0).to_string();
        ctx.emit(Notification::DialogueEvent(name));
        Ok(())
    }
}

pub(crate) fn contracts() -> Vec<CommandContract> {
    vec![
        CommandContract::new("speak", SpeakCommand)
            .with_description("Changes the speaker to a character or a literal name")
            .with_argument(ArgumentConstraint::required([
                ArgKind::Identifier,
                ArgKind::String,
            ])),
        CommandContract::new("text", TextCommand)
            .with_description("Shows a line of dialogue and waits")
            .with_argument(ArgumentConstraint::required([ArgKind::Text]))
            .implicit(),
        CommandContract::new("event", EventCommand)
            .with_description("Raises a named event for the host")
            .with_argument(ArgumentConstraint::required([
                ArgKind::Identifier,
                ArgKind::String,
            ])),
    ]
}
