//! Built-in commands.

pub mod flow;
pub mod numeric;
pub mod output;
pub mod structure;

use crate::contract::CommandContract;

/// Returns the contract of every built-in command.
#[must_use]
pub fn contracts() -> Vec<CommandContract> {
    let mut contracts = structure::contracts();
    contracts.extend(output::contracts());
    contracts.extend(flow::contracts());
    contracts.extend(numeric::contracts());
    contracts
}
