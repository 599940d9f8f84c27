//! The suspendable interpreter.
//!
//! The interpreter runs the active conversation one command at a time
//! until a command suspends it (a line of text, or the last of a run of
//! options), the script ends, a command fails, or control passes into
//! another conversation. The host resumes it with [`Interpreter::next`] or
//! [`Interpreter::choose_option`].
//!
//! Everything the host should render is reported as a [`Notification`],
//! both to listeners registered on [`Interpreter::events_mut`] and to an
//! outbox drained with [`Interpreter::take_notifications`]. The outbox only
//! holds what the most recent call emitted.

use parley_foundation::{Error, ErrorKind, Result};
use parley_grammar::{Grammar, ParseOutcome, parse_program};

use crate::catalog::CommandCatalog;
use crate::commands::flow::CONTINUE_LABEL;
use crate::context::{Cursor, PendingOption, ResolveContext};
use crate::events::{EventEmitter, Notification, Severity};
use crate::loader::{LoadConfig, Loader, normalize_newlines};
use crate::script::{Command, Conversation, ConversationId, DialogueScript};
use crate::snapshot::Snapshot;

/// Why the interpreter stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Ran past the last command.
    Completed,
    /// Reached a command of another conversation.
    ConversationEnded,
    /// A command failed.
    Halted,
    /// The host called [`Interpreter::stop`].
    Requested,
}

/// Interpreter lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// No script loaded.
    Idle,
    /// A script is loaded but no conversation has started.
    Loaded,
    /// Executing commands.
    Running,
    /// Waiting for [`Interpreter::next`] or [`Interpreter::choose_option`].
    Suspended,
    /// The conversation is over.
    Stopped(StopReason),
}

enum Step {
    Continue,
    Suspend,
    Stop(StopReason),
}

/// Loads scripts and runs their conversations.
pub struct Interpreter {
    catalog: CommandCatalog,
    grammar: Grammar,
    config: LoadConfig,
    script: Option<DialogueScript>,
    active: Option<ConversationId>,
    cursor: Option<Cursor>,
    state: State,
    events: EventEmitter,
    outbox: Vec<Notification>,
}

impl Interpreter {
    /// Creates an interpreter with the built-in commands.
    ///
    /// # Errors
    ///
    /// Returns an error if the command grammar cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_catalog(CommandCatalog::standard())
    }

    /// Creates an interpreter with a custom catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be projected into the grammar.
    pub fn with_catalog(catalog: CommandCatalog) -> Result<Self> {
        let grammar = catalog.grammar()?;
        Ok(Self {
            catalog,
            grammar,
            config: LoadConfig::default(),
            script: None,
            active: None,
            cursor: None,
            state: State::Idle,
            events: EventEmitter::new(),
            outbox: Vec::new(),
        })
    }

    /// Sets the load options used by later loads.
    #[must_use]
    pub fn with_config(mut self, config: LoadConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the command catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    /// Returns the grammar, with the catalog projected into it.
    #[must_use]
    pub const fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns the loaded script.
    #[must_use]
    pub const fn script(&self) -> Option<&DialogueScript> {
        self.script.as_ref()
    }

    /// Returns the options waiting for a choice.
    #[must_use]
    pub fn pending_options(&self) -> &[PendingOption] {
        self.cursor.as_ref().map_or(&[], |c| c.options.as_slice())
    }

    /// Returns the index of the current command, while a cursor exists.
    #[must_use]
    pub fn pc(&self) -> Option<usize> {
        self.cursor.as_ref().map(|c| c.pc)
    }

    /// Returns the number of pending returns.
    #[must_use]
    pub fn jump_depth(&self) -> usize {
        self.cursor.as_ref().map_or(0, |c| c.jump_stack.len())
    }

    /// Parses text with this interpreter's grammar without loading it.
    #[must_use]
    pub fn parse(&self, text: &str) -> ParseOutcome {
        parse_program(&self.grammar, &normalize_newlines(text))
    }

    /// Loads a script, replacing the current one only on success.
    ///
    /// # Errors
    ///
    /// Returns the first diagnostic if the script does not load.
    pub fn load(&mut self, text: &str) -> Result<()> {
        let script = Loader::new(&self.grammar, &self.catalog, &self.config)
            .load(text)
            .map_err(Error::load)?;
        self.script = Some(script);
        self.active = None;
        self.cursor = None;
        self.state = State::Loaded;
        Ok(())
    }

    /// Makes a conversation active and runs it from its start.
    ///
    /// # Errors
    ///
    /// Returns an error if no script is loaded or the conversation does not
    /// exist.
    pub fn start_conversation(&mut self, name: &str) -> Result<()> {
        let script = self
            .script
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::NoScript))?;
        let (id, start) = script
            .conversations
            .find(name)
            .and_then(|id| Some((id, script.conversations.get(id)?.start())))
            .ok_or_else(|| Error::unknown_conversation(name))?;

        log::debug!("starting conversation {name} at command {start}");
        self.outbox.clear();
        self.active = Some(id);
        self.cursor = Some(Cursor::new(id, start));
        self.emit(Notification::OptionsCleared);
        self.state = State::Suspended;
        self.resume();
        Ok(())
    }

    /// Resumes a suspended conversation.
    ///
    /// Returns false, doing nothing, unless the interpreter is suspended.
    pub fn next(&mut self) -> bool {
        if self.state != State::Suspended {
            return false;
        }
        self.outbox.clear();
        self.resume()
    }

    fn resume(&mut self) -> bool {
        let Some(cursor) = self.cursor.as_mut() else {
            return false;
        };
        if cursor.resume_advances {
            cursor.pc += 1;
        }
        self.run();
        true
    }

    /// Picks one of the pending options and resumes.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no active conversation, the interpreter
    /// is not suspended, `index` is not a pending option, or the option
    /// names a label the conversation lacks. The interpreter stays
    /// suspended with its options intact on error.
    pub fn choose_option(&mut self, index: usize) -> Result<()> {
        if self.active.is_none() {
            return Err(Error::new(ErrorKind::NoActiveConversation));
        }
        if self.state != State::Suspended {
            return Err(Error::new(ErrorKind::NotSuspended));
        }
        let (Some(script), Some(cursor)) = (self.script.as_ref(), self.cursor.as_mut()) else {
            return Err(Error::new(ErrorKind::NotSuspended));
        };
        let Some(option) = cursor.options.get(index) else {
            return Err(Error::option_out_of_range(index, cursor.options.len()));
        };

        let target = if option.label == CONTINUE_LABEL {
            last_in_run(&script.commands, cursor.pc)
        } else {
            script
                .conversations
                .get(cursor.conversation)
                .and_then(|c| c.label(&option.label))
                .ok_or_else(|| Error::unknown_label(&option.label))?
        };
        log::debug!("chose option {index} ({}), moving to {target}", option.label);
        cursor.pc = target;
        cursor.options.clear();
        cursor.resume_advances = true;

        self.outbox.clear();
        self.emit(Notification::OptionsCleared);
        self.resume();
        Ok(())
    }

    /// Ends the active conversation.
    pub fn stop(&mut self) {
        if self.cursor.take().is_some() {
            self.outbox.clear();
            self.emit(Notification::OptionsCleared);
            self.state = State::Stopped(StopReason::Requested);
            log::debug!("stopped by host");
        }
    }

    fn run(&mut self) {
        self.state = State::Running;
        loop {
            match self.step() {
                Step::Continue => {}
                Step::Suspend => {
                    self.state = State::Suspended;
                    return;
                }
                Step::Stop(reason) => {
                    self.cursor = None;
                    if reason == StopReason::ConversationEnded {
                        self.emit(Notification::OptionsCleared);
                    }
                    self.state = State::Stopped(reason);
                    log::debug!("conversation stopped: {reason:?}");
                    return;
                }
            }
        }
    }

    fn step(&mut self) -> Step {
        let (Some(script), Some(cursor)) = (self.script.as_mut(), self.cursor.as_mut()) else {
            return Step::Stop(StopReason::Completed);
        };
        let pc = cursor.pc;
        let Some(command) = script.commands.get(pc) else {
            return Step::Stop(StopReason::Completed);
        };
        if command.conversation != Some(cursor.conversation) {
            return Step::Stop(StopReason::ConversationEnded);
        }
        let keyword = command.keyword.text.clone();
        let Some(contract) = self.catalog.get(command.contract) else {
            return Step::Stop(StopReason::Halted);
        };

        cursor.ready = true;
        let (commands, conversations) = script.parts_mut();
        let mut ctx = ResolveContext::new(commands, conversations, cursor);
        let result = contract.behavior().resolve(&mut ctx);
        let (notifications, warnings) = ctx.finish();
        let ready = cursor.ready;
        log::trace!("resolved {pc}: @{keyword}");

        for notification in notifications {
            self.emit(notification);
        }
        if let Err(error) = result {
            let message = format!("@{keyword} Error - {error}");
            log::error!("{message}");
            self.emit(Notification::Error {
                message,
                severity: Severity::Fatal,
            });
            return Step::Stop(StopReason::Halted);
        }
        for warning in warnings {
            let message = format!("@{keyword} Warning - {warning}");
            log::warn!("{message}");
            self.emit(Notification::Error {
                message: message.clone(),
                severity: Severity::Warning,
            });
            self.emit(Notification::Warning(message));
        }

        let Some(cursor) = self.cursor.as_mut() else {
            return Step::Stop(StopReason::Completed);
        };
        if ready {
            cursor.pc += 1;
            Step::Continue
        } else {
            cursor.resume_advances = true;
            Step::Suspend
        }
    }

    fn emit(&mut self, notification: Notification) {
        self.events.trigger(&notification);
        self.outbox.push(notification);
    }

    /// Returns the listener registry.
    pub fn events_mut(&mut self) -> &mut EventEmitter {
        &mut self.events
    }

    /// Returns the notifications emitted by the most recent call that ran
    /// the conversation, unless they have been taken.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.outbox
    }

    /// Takes and clears the notifications of the most recent call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    /// Returns the active conversation.
    #[must_use]
    pub fn active_conversation(&self) -> Option<&Conversation> {
        let id = self.active?;
        self.script.as_ref()?.conversations.get(id)
    }

    fn active_conversation_mut(&mut self) -> Result<&mut Conversation> {
        let id = self
            .active
            .ok_or_else(|| Error::new(ErrorKind::NoActiveConversation))?;
        self.script
            .as_mut()
            .and_then(|s| s.conversations.get_mut(id))
            .ok_or_else(|| Error::new(ErrorKind::NoActiveConversation))
    }

    /// Assigns a number in the active conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if no conversation is active.
    pub fn set_number(&mut self, id: &str, value: f64) -> Result<()> {
        self.active_conversation_mut()?
            .numbers
            .insert(id.to_string(), value);
        Ok(())
    }

    /// Reads a number of the active conversation.
    #[must_use]
    pub fn number(&self, id: &str) -> Option<f64> {
        self.active_conversation()?.numbers.get(id).copied()
    }

    /// Renames a character of the active conversation.
    ///
    /// Returns false if the character has not entered the conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if no conversation is active.
    pub fn set_character_name(&mut self, id: &str, name: &str) -> Result<bool> {
        let conversation = self.active_conversation_mut()?;
        Ok(conversation
            .characters
            .get_mut(id)
            .map(|existing| *existing = name.to_string())
            .is_some())
    }

    /// Returns a character's display name in the active conversation.
    #[must_use]
    pub fn character_name(&self, id: &str) -> Option<&str> {
        self.active_conversation()?
            .characters
            .get(id)
            .map(String::as_str)
    }

    /// Captures the active conversation's numbers and character names.
    ///
    /// # Errors
    ///
    /// Returns an error if no conversation is active.
    pub fn snapshot(&self) -> Result<Snapshot> {
        self.active_conversation()
            .map(Snapshot::capture)
            .ok_or_else(|| Error::new(ErrorKind::NoActiveConversation))
    }

    /// Applies a snapshot to the conversation it names.
    ///
    /// # Errors
    ///
    /// Returns an error if no script is loaded or it has no such
    /// conversation.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        let script = self
            .script
            .as_mut()
            .ok_or_else(|| Error::new(ErrorKind::NoScript))?;
        let conversation = script
            .conversations
            .find(&snapshot.conversation)
            .and_then(|id| script.conversations.get_mut(id))
            .ok_or_else(|| Error::unknown_conversation(&snapshot.conversation))?;
        snapshot.apply(conversation);
        log::debug!("restored state of {}", snapshot.conversation);
        Ok(())
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("state", &self.state)
            .field("pc", &self.pc())
            .field("pending_options", &self.pending_options().len())
            .finish_non_exhaustive()
    }
}

/// Returns the index of the last command in the run of commands sharing the
/// contract of the command at `pc`.
fn last_in_run(commands: &[Command], pc: usize) -> usize {
    let Some(contract) = commands.get(pc).map(|c| c.contract) else {
        return pc;
    };
    let mut last = pc;
    while commands.get(last + 1).is_some_and(|c| c.contract == contract) {
        last += 1;
    }
    last
}
