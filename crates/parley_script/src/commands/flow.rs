//! Control flow: jumps, returns, and player options.

use crate::context::{ResolveContext, ValidateContext};
use crate::contract::{ArgKind, ArgumentConstraint, CommandBehavior, CommandContract};
use crate::error::CommandError;
use crate::events::Notification;

/// Label that continues after the option run instead of jumping.
pub const CONTINUE_LABEL: &str = "_";

/// `@option <label> "Text"`
pub struct OptionCommand;

impl CommandBehavior for OptionCommand {
    fn validate(&self, ctx: &ValidateContext<'_>) -> Result<(), CommandError> {
        let label = ctx.command.text(0);
        if label == CONTINUE_LABEL {
            return Ok(());
        }
        ctx.require_label(label)
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        let command = ctx.command()?;
        let label = command.text(0);
        let text = ctx.interpolate(command.text(1))?;
        let index = ctx.add_option(label, text.clone());
        ctx.emit(Notification::OptionAdded {
            index,
            text,
            label: label.to_string(),
        });
        // consecutive options are offered together
        let batched = ctx
            .next_command()
            .is_some_and(|next| next.contract == command.contract);
        if !batched {
            ctx.suspend();
        }
        Ok(())
    }
}

/// `@jump <label>`
pub struct JumpCommand;

impl CommandBehavior for JumpCommand {
    fn validate(&self, ctx: &ValidateContext<'_>) -> Result<(), CommandError> {
        ctx.require_label(ctx.command.text(0))
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        let label = ctx.argument(0)?;
        ctx.jump(&label.text)
    }
}

/// How a conditional jump compares its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// `a == b`
    Equal,
    /// `a > b`
    Greater,
}

impl Comparison {
    #[allow(clippy::float_cmp)]
    fn holds(self, a: f64, b: f64) -> bool {
        match self {
            Self::Equal => a == b,
            Self::Greater => a > b,
        }
    }
}

/// `@jumpeq <label> <a> <b>` and `@jumpgt <label> <a> <b>`
pub struct ConditionalJumpCommand(pub Comparison);

impl CommandBehavior for ConditionalJumpCommand {
    fn validate(&self, ctx: &ValidateContext<'_>) -> Result<(), CommandError> {
        ctx.require_label(ctx.command.text(0))
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        let a = ctx.number(ctx.argument(1)?)?;
        let b = ctx.number(ctx.argument(2)?)?;
        if self.0.holds(a, b) {
            let label = ctx.argument(0)?;
            ctx.jump(&label.text)?;
        }
        Ok(())
    }
}

/// `@return`
pub struct ReturnCommand;

impl CommandBehavior for ReturnCommand {
    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        if let Some(pc) = ctx.pop_return() {
            ctx.set_pc(pc);
        }
        Ok(())
    }
}

fn conditional(keyword: &str, comparison: Comparison, description: &str) -> CommandContract {
    let operand = || ArgumentConstraint::required([ArgKind::Identifier, ArgKind::Number]);
    CommandContract::new(keyword, ConditionalJumpCommand(comparison))
        .with_description(description)
        .with_argument(ArgumentConstraint::required([ArgKind::Identifier]))
        .with_argument(operand())
        .with_argument(operand())
}

pub(crate) fn contracts() -> Vec<CommandContract> {
    vec![
        CommandContract::new("option", OptionCommand)
            .with_description("Offers the player a choice leading to a label, or _ to continue")
            .with_argument(ArgumentConstraint::required([ArgKind::Identifier]))
            .with_argument(ArgumentConstraint::required([ArgKind::String])),
        CommandContract::new("jump", JumpCommand)
            .with_description("Jumps to a label, remembering where to return")
            .with_argument(ArgumentConstraint::required([ArgKind::Identifier])),
        conditional(
            "jumpeq",
            Comparison::Equal,
            "Jumps to a label when two numbers are equal",
        ),
        conditional(
            "jumpgt",
            Comparison::Greater,
            "Jumps to a label when the first number is greater",
        ),
        CommandContract::new("return", ReturnCommand)
            .with_description("Returns to just after the most recent jump"),
    ]
}
