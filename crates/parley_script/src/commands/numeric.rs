//! Numeric variables.

use crate::context::ResolveContext;
use crate::contract::{ArgKind, ArgumentConstraint, CommandBehavior, CommandContract};
use crate::error::CommandError;

/// What a numeric command does with its operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericOp {
    /// `@number`: assign.
    Assign,
    /// `@add`: add to the current value.
    Add,
    /// `@mul`: multiply the current value.
    Multiply,
    /// `@div`: divide the current value.
    Divide,
}

/// `@number`, `@add`, `@mul`, and `@div`, all `<id> <id | number>`.
pub struct NumericCommand(pub NumericOp);

impl CommandBehavior for NumericCommand {
    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        let target = &ctx.argument(0)?.text;
        let operand = ctx.number(ctx.argument(1)?)?;

        let value = match self.0 {
            NumericOp::Assign => operand,
            NumericOp::Add => current(ctx, target)? + operand,
            NumericOp::Multiply => current(ctx, target)? * operand,
            NumericOp::Divide => {
                let current = current(ctx, target)?;
                if operand == 0.0 {
                    return Err(CommandError::DivisionByZero(target.clone()));
                }
                current / operand
            }
        };

        log::trace!("{target} = {value}");
        ctx.conversation_mut()?.numbers.insert(target.clone(), value);
        Ok(())
    }
}

fn current(ctx: &ResolveContext<'_>, target: &str) -> Result<f64, CommandError> {
    ctx.conversation()?
        .numbers
        .get(target)
        .copied()
        .ok_or_else(|| CommandError::UnassignedNumber(target.to_string()))
}

fn numeric(keyword: &str, op: NumericOp, description: &str) -> CommandContract {
    CommandContract::new(keyword, NumericCommand(op))
        .with_description(description)
        .with_argument(ArgumentConstraint::required([ArgKind::Identifier]))
        .with_argument(ArgumentConstraint::required([
            ArgKind::Identifier,
            ArgKind::Number,
        ]))
}

pub(crate) fn contracts() -> Vec<CommandContract> {
    vec![
        numeric("number", NumericOp::Assign, "Assigns a numeric variable"),
        numeric("add", NumericOp::Add, "Adds to a numeric variable"),
        numeric("mul", NumericOp::Multiply, "Multiplies a numeric variable"),
        numeric("div", NumericOp::Divide, "Divides a numeric variable"),
    ]
}
