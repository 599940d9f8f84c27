//! Errors raised by command handlers.
//!
//! The loader and interpreter wrap these with the command keyword, so a
//! handler only describes what went wrong.

use thiserror::Error;

/// A failure inside a command's preprocess, validate, or resolve step.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CommandError {
    /// The keyword has no registered contract.
    #[error("Command [{0}] does not exist")]
    UnknownCommand(String),

    /// More arguments than the contract declares.
    #[error("Too many arguments. Expected at most {0}")]
    TooManyArguments(usize),

    /// A required argument is absent.
    #[error("Missing arguments. Expected [{0}]")]
    MissingArguments(String),

    /// An argument has a kind the contract does not accept.
    #[error("Invalid argument type [{found}] ({text}). Expected [{expected}]")]
    InvalidArgumentType {
        /// The kind that was found.
        found: String,
        /// The argument text.
        text: String,
        /// The accepted kinds.
        expected: String,
    },

    /// The command appears before any `conversation` command.
    #[error("Command is not part of a conversation")]
    NoConversation,

    /// A conversation with this name already exists.
    #[error("Conversation \"{0}\" is already defined")]
    DuplicateConversation(String),

    /// A label with this name already exists in the conversation.
    #[error("Label \"{0}\" is already defined in this conversation")]
    DuplicateLabel(String),

    /// A jump or option target is not a label of the conversation.
    #[error("Jump label \"{0}\" does not exist in this conversation")]
    UnknownLabel(String),

    /// A numeric id was read before it was assigned.
    #[error("No number with id ({0}) has been created in this conversation")]
    UnassignedNumber(String),

    /// A numeric literal could not be read.
    #[error("Invalid number ({0})")]
    InvalidNumber(String),

    /// `div` with a zero divisor.
    #[error("Cannot divide ({0}) by zero")]
    DivisionByZero(String),

    /// A host-defined failure.
    #[error("{0}")]
    Custom(String),
}
