//! What command handlers can see and change in each phase.
//!
//! Handlers never touch the interpreter directly. Each phase hands them a
//! context scoped to what that phase may do: preprocess builds the
//! conversation maps, validate only reads, and resolve moves the cursor and
//! raises notifications. Notifications raised during resolve are buffered
//! and dispatched by the interpreter once the handler returns.

use parley_foundation::{Token, TokenKind};

use crate::error::CommandError;
use crate::events::Notification;
use crate::interpolate::interpolate;
use crate::loader::LoadConfig;
use crate::script::{Command, Conversation, ConversationId, Conversations};

/// An option waiting for the player to choose it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingOption {
    /// Interpolated option text.
    pub text: String,
    /// Target label, or `_`.
    pub label: String,
}

/// Execution state of the active conversation.
#[derive(Clone, Debug, PartialEq)]
pub struct Cursor {
    /// The conversation being run.
    pub conversation: ConversationId,
    /// Index of the current command.
    pub pc: usize,
    /// Cleared by a handler to suspend after the current command.
    pub ready: bool,
    /// Whether resuming first moves past the command that suspended.
    pub resume_advances: bool,
    /// Return points pushed by jumps.
    pub jump_stack: Vec<usize>,
    /// Options offered since the last choice.
    pub options: Vec<PendingOption>,
}

impl Cursor {
    /// Creates a cursor at `pc`.
    #[must_use]
    pub const fn new(conversation: ConversationId, pc: usize) -> Self {
        Self {
            conversation,
            pc,
            ready: true,
            resume_advances: false,
            jump_stack: Vec::new(),
            options: Vec::new(),
        }
    }
}

/// Context for the first load pass.
pub struct PreprocessContext<'a> {
    /// The command being preprocessed.
    pub command: &'a mut Command,
    /// Every conversation registered so far.
    pub conversations: &'a mut Conversations,
    /// The conversation later commands will belong to.
    pub current: &'a mut Option<ConversationId>,
    /// Load options.
    pub config: &'a LoadConfig,
}

impl PreprocessContext<'_> {
    /// Returns the command's conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the command precedes every `conversation`.
    pub fn conversation_mut(&mut self) -> Result<&mut Conversation, CommandError> {
        self.command
            .conversation
            .and_then(|id| self.conversations.get_mut(id))
            .ok_or(CommandError::NoConversation)
    }
}

/// Context for the second load pass.
pub struct ValidateContext<'a> {
    /// The command being validated.
    pub command: &'a Command,
    /// Every command of the script.
    pub commands: &'a [Command],
    /// Every conversation of the script.
    pub conversations: &'a Conversations,
}

impl ValidateContext<'_> {
    /// Returns the command's conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the command precedes every `conversation`.
    pub fn conversation(&self) -> Result<&Conversation, CommandError> {
        self.command
            .conversation
            .and_then(|id| self.conversations.get(id))
            .ok_or(CommandError::NoConversation)
    }

    /// Checks that `label` names a label of the command's conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is unknown.
    pub fn require_label(&self, label: &str) -> Result<(), CommandError> {
        self.conversation()?
            .label(label)
            .map(|_| ())
            .ok_or_else(|| CommandError::UnknownLabel(label.to_string()))
    }
}

/// Context for executing one command.
pub struct ResolveContext<'a> {
    commands: &'a [Command],
    conversations: &'a mut Conversations,
    cursor: &'a mut Cursor,
    notifications: Vec<Notification>,
    warnings: Vec<String>,
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(
        commands: &'a [Command],
        conversations: &'a mut Conversations,
        cursor: &'a mut Cursor,
    ) -> Self {
        Self {
            commands,
            conversations,
            cursor,
            notifications: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> (Vec<Notification>, Vec<String>) {
        (self.notifications, self.warnings)
    }

    /// Returns the command being resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor points past the script.
    pub fn command(&self) -> Result<&'a Command, CommandError> {
        self.commands
            .get(self.cursor.pc)
            .ok_or_else(|| CommandError::Custom(format!("no command at {}", self.cursor.pc)))
    }

    /// Returns an argument of the command being resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is absent.
    pub fn argument(&self, index: usize) -> Result<&'a Token, CommandError> {
        self.command()?
            .argument(index)
            .ok_or_else(|| CommandError::MissingArguments(format!("argument {}", index + 1)))
    }

    /// Returns the command after the current one, if any.
    #[must_use]
    pub fn next_command(&self) -> Option<&'a Command> {
        self.commands.get(self.cursor.pc + 1)
    }

    /// Returns the conversation being run.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversation has gone missing.
    pub fn conversation(&self) -> Result<&Conversation, CommandError> {
        self.conversations
            .get(self.cursor.conversation)
            .ok_or(CommandError::NoConversation)
    }

    /// Returns the conversation being run, mutably.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversation has gone missing.
    pub fn conversation_mut(&mut self) -> Result<&mut Conversation, CommandError> {
        self.conversations
            .get_mut(self.cursor.conversation)
            .ok_or(CommandError::NoConversation)
    }

    /// Returns the program counter.
    #[must_use]
    pub fn pc(&self) -> usize {
        self.cursor.pc
    }

    /// Moves the program counter. The interpreter advances past the new
    /// position before running the next command.
    pub fn set_pc(&mut self, pc: usize) {
        self.cursor.pc = pc;
    }

    /// Pushes the current position as a return point.
    pub fn push_return(&mut self) {
        self.cursor.jump_stack.push(self.cursor.pc);
    }

    /// Pops the most recent return point.
    pub fn pop_return(&mut self) -> Option<usize> {
        self.cursor.jump_stack.pop()
    }

    /// Returns the depth of the jump stack.
    #[must_use]
    pub fn jump_depth(&self) -> usize {
        self.cursor.jump_stack.len()
    }

    /// Pushes a return point and moves to `label`.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is unknown.
    pub fn jump(&mut self, label: &str) -> Result<(), CommandError> {
        let target = self
            .conversation()?
            .label(label)
            .ok_or_else(|| CommandError::UnknownLabel(label.to_string()))?;
        self.push_return();
        self.set_pc(target);
        Ok(())
    }

    /// Suspends after this command until the host resumes.
    pub fn suspend(&mut self) {
        self.cursor.ready = false;
    }

    /// Queues a notification.
    pub fn emit(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Records a non-fatal problem.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Adds a pending option and returns its index.
    pub fn add_option(&mut self, label: impl Into<String>, text: impl Into<String>) -> usize {
        self.cursor.options.push(PendingOption {
            text: text.into(),
            label: label.into(),
        });
        self.cursor.options.len() - 1
    }

    /// Substitutes `%id` references from the conversation, warning about
    /// any that have no value.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversation has gone missing.
    pub fn interpolate(&mut self, text: &str) -> Result<String, CommandError> {
        let conversation = self.conversation()?;
        let result = interpolate(text, |id| {
            conversation
                .characters
                .get(id)
                .cloned()
                .or_else(|| conversation.numbers.get(id).map(f64::to_string))
        });
        for id in result.unresolved {
            self.warn(format!("No character or number with id ({id}) to insert"));
        }
        Ok(result.text)
    }

    /// Reads a numeric argument: a literal, or an assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed literal or an unassigned id.
    pub fn number(&self, token: &Token) -> Result<f64, CommandError> {
        if token.kind == TokenKind::Number {
            return token
                .text
                .parse()
                .map_err(|_| CommandError::InvalidNumber(token.text.clone()));
        }
        self.conversation()?
            .numbers
            .get(&token.text)
            .copied()
            .ok_or_else(|| CommandError::UnassignedNumber(token.text.clone()))
    }
}
