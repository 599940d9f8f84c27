//! Commands that declare structure: conversations, labels, characters.

use crate::context::PreprocessContext;
use crate::contract::{ArgKind, ArgumentConstraint, CommandBehavior, CommandContract};
use crate::error::CommandError;

/// `@conversation <id>`
pub struct ConversationCommand;

impl CommandBehavior for ConversationCommand {
    fn preprocess(&self, ctx: &mut PreprocessContext<'_>) -> Result<(), CommandError> {
        let name = ctx.command.text(0).to_string();
        let id = ctx.conversations.insert(&name, ctx.command.index)?;
        ctx.command.conversation = Some(id);
        *ctx.current = Some(id);
        log::trace!("conversation {name} starts at {}", ctx.command.index);
        Ok(())
    }
}

/// `@label <id>`
pub struct LabelCommand;

impl CommandBehavior for LabelCommand {
    fn preprocess(&self, ctx: &mut PreprocessContext<'_>) -> Result<(), CommandError> {
        let name = ctx.command.text(0).to_string();
        let index = ctx.command.index;
        let strict = ctx.config.strict_labels;
        let conversation = ctx.conversation_mut()?;
        if conversation.labels.contains_key(&name) {
            if strict {
                return Err(CommandError::DuplicateLabel(name));
            }
            log::warn!(
                "label {name} at command {index} is already defined in {}, keeping the first",
                conversation.name()
            );
            return Ok(());
        }
        conversation.labels.insert(name, index);
        Ok(())
    }
}

/// `@enter <id> ["Display name"]`
pub struct EnterCommand;

impl CommandBehavior for EnterCommand {
    fn preprocess(&self, ctx: &mut PreprocessContext<'_>) -> Result<(), CommandError> {
        let id = ctx.command.text(0).to_string();
        let name = ctx
            .command
            .argument(1)
            .map_or_else(|| id.clone(), |t| t.text.clone());
        ctx.conversation_mut()?
            .characters
            .entry(id)
            .or_insert(name);
        Ok(())
    }
}

pub(crate) fn contracts() -> Vec<CommandContract> {
    vec![
        CommandContract::new("conversation", ConversationCommand)
            .with_description("Starts a named conversation")
            .with_argument(ArgumentConstraint::required([ArgKind::Identifier])),
        CommandContract::new("label", LabelCommand)
            .with_description("Marks a jump target")
            .with_argument(ArgumentConstraint::required([ArgKind::Identifier])),
        CommandContract::new("enter", EnterCommand)
            .with_description("Introduces a character, optionally with a display name")
            .with_argument(ArgumentConstraint::required([ArgKind::Identifier]))
            .with_argument(ArgumentConstraint::optional([ArgKind::String])),
    ]
}
