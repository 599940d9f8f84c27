//! The terminal player.
//!
//! Plays one conversation of a loaded script: prints each line of dialogue,
//! waits for Enter, lists options and reads the player's choice. A few
//! `:`-commands manage the session while it waits.

use std::io::{self, Stdout, Write};
use std::path::PathBuf;

use parley_foundation::{Error, ErrorKind, Result};
use parley_script::{Interpreter, Notification, Severity, State, StopReason};

use crate::config::PlayerConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::serialize;

/// Something typed at the player prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Empty line: continue past text.
    Continue,
    /// A 1-based option number.
    Choose(usize),
    /// `:quit`
    Quit,
    /// `:save [path]`
    Save(Option<PathBuf>),
    /// `:load [path]`
    Load(Option<PathBuf>),
    /// `:state`
    State,
    /// `:help`
    Help,
    /// Anything else.
    Unknown(String),
}

impl PlayerCommand {
    /// Words offered for completion.
    pub const COMPLETIONS: [&'static str; 5] = [":quit", ":save", ":load", ":state", ":help"];

    /// Parses one line of input.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Continue;
        }
        if let Ok(number) = input.parse::<usize>() {
            return Self::Choose(number);
        }
        let (command, argument) = match input.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, Some(PathBuf::from(argument.trim()))),
            None => (input, None),
        };
        match command {
            ":q" | ":quit" => Self::Quit,
            ":save" => Self::Save(argument),
            ":load" => Self::Load(argument),
            ":state" => Self::State,
            ":h" | ":help" => Self::Help,
            _ => Self::Unknown(input.to_string()),
        }
    }
}

/// Plays a loaded script in the terminal.
pub struct Player<E: LineEditor = RustylineEditor, W: Write = Stdout> {
    interpreter: Interpreter,
    editor: E,
    out: W,
    config: PlayerConfig,
    speaker: Option<String>,
}

impl Player<RustylineEditor, Stdout> {
    /// Creates a player with the default rustyline editor, writing to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(interpreter: Interpreter) -> Result<Self> {
        Ok(Self::with_editor(interpreter, RustylineEditor::new()?))
    }
}

impl<E: LineEditor> Player<E, Stdout> {
    /// Creates a player with the given editor, writing to stdout.
    pub fn with_editor(interpreter: Interpreter, mut editor: E) -> Self {
        editor.set_completions(
            PlayerCommand::COMPLETIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        );
        Self {
            interpreter,
            editor,
            out: io::stdout(),
            config: PlayerConfig::default(),
            speaker: None,
        }
    }
}

impl<E: LineEditor, W: Write> Player<E, W> {
    /// Redirects output.
    #[must_use]
    pub fn with_output<W2: Write>(self, out: W2) -> Player<E, W2> {
        Player {
            interpreter: self.interpreter,
            editor: self.editor,
            out,
            config: self.config,
            speaker: self.speaker,
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: PlayerConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Returns the interpreter.
    #[must_use]
    pub const fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Returns the interpreter mutably.
    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Returns the output sink.
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Plays the configured conversation until it ends or the player quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversation cannot start, input cannot be
    /// read, or output cannot be written.
    pub fn run(&mut self) -> Result<()> {
        if self.config.show_banner {
            self.print_banner()?;
        }

        let start = self.start_name()?;
        self.interpreter.start_conversation(&start)?;

        loop {
            self.render_notifications()?;
            match self.interpreter.state() {
                State::Suspended => {
                    if !self.prompt()? {
                        self.interpreter.stop();
                        self.render_notifications()?;
                        break;
                    }
                }
                State::Stopped(reason) => {
                    self.print_stop(reason)?;
                    break;
                }
                State::Idle | State::Loaded | State::Running => break,
            }
        }

        if let Some(path) = self.config.save_path.clone() {
            self.save(&path)?;
        }
        Ok(())
    }

    fn start_name(&self) -> Result<String> {
        if let Some(start) = &self.config.start {
            return Ok(start.clone());
        }
        let script = self
            .interpreter
            .script()
            .ok_or_else(|| Error::new(ErrorKind::NoScript))?;
        script
            .conversations()
            .iter()
            .next()
            .map(|c| c.name().to_string())
            .ok_or_else(|| Error::unknown_conversation("<none>").with_context("script has no conversations"))
    }

    /// Handles one suspension. Returns false when the player quits.
    fn prompt(&mut self) -> Result<bool> {
        let options = self.interpreter.pending_options().len();
        if options == 0 && self.config.auto_advance {
            self.interpreter.next();
            return Ok(true);
        }

        let prompt = if options > 0 {
            format!("[1-{options}] {}", self.config.prompt)
        } else {
            self.config.prompt.clone()
        };
        let line = match self.editor.read_line(&prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted | ReadResult::Eof => return Ok(false),
        };
        if !line.trim().is_empty() {
            self.editor.add_history(line.trim());
        }

        match PlayerCommand::parse(&line) {
            PlayerCommand::Quit => return Ok(false),
            PlayerCommand::Continue if options == 0 => {
                self.interpreter.next();
            }
            PlayerCommand::Choose(number) if options > 0 => {
                let choice = number.checked_sub(1).unwrap_or(usize::MAX);
                if let Err(e) = self.interpreter.choose_option(choice) {
                    self.print_error(&e)?;
                }
            }
            PlayerCommand::Continue | PlayerCommand::Choose(_) => {
                if options > 0 {
                    self.line(&format!("Choose an option from 1 to {options}."))?;
                } else {
                    self.interpreter.next();
                }
            }
            PlayerCommand::Save(path) => match path.or_else(|| self.config.save_path.clone()) {
                Some(path) => self.save(&path)?,
                None => self.line("No save file given.")?,
            },
            PlayerCommand::Load(path) => match path.or_else(|| self.config.save_path.clone()) {
                Some(path) => self.restore(&path)?,
                None => self.line("No save file given.")?,
            },
            PlayerCommand::State => self.print_state()?,
            PlayerCommand::Help => self.print_help()?,
            PlayerCommand::Unknown(input) => {
                self.line(&format!("Unknown command {input}. Type :help for help."))?;
            }
        }
        Ok(true)
    }

    fn save(&mut self, path: &std::path::Path) -> Result<()> {
        let snapshot = self.interpreter.snapshot()?;
        serialize::save_to_file(&snapshot, path)?;
        self.line(&format!("Saved to {}.", path.display()))
    }

    fn restore(&mut self, path: &std::path::Path) -> Result<()> {
        match serialize::load_from_file(path).and_then(|s| self.interpreter.restore(&s)) {
            Ok(()) => self.line(&format!("Loaded {}.", path.display())),
            Err(e) => self.print_error(&e),
        }
    }

    fn render_notifications(&mut self) -> Result<()> {
        for notification in self.interpreter.take_notifications() {
            self.render(&notification)?;
        }
        Ok(())
    }

    fn render(&mut self, notification: &Notification) -> Result<()> {
        match notification {
            Notification::SpeakerChanged(name) => self.speaker = Some(name.clone()),
            Notification::TextChanged(text) => {
                let line = match &self.speaker {
                    Some(speaker) => format!("{}: {text}", self.paint("1;36", speaker)),
                    None => text.clone(),
                };
                self.line(&line)?;
            }
            Notification::OptionAdded { index, text, .. } => {
                let line = format!("  {}. {text}", self.paint("33", &(index + 1).to_string()));
                self.line(&line)?;
            }
            Notification::DialogueEvent(name) => {
                let line = self.paint("2", &format!("* {name} *"));
                self.line(&line)?;
            }
            Notification::Error {
                message,
                severity: Severity::Fatal,
            } => {
                let line = self.paint("31", message);
                self.line(&line)?;
            }
            // Warnings are reported through the log.
            Notification::Error { .. } | Notification::Warning(_) | Notification::OptionsCleared => {}
        }
        Ok(())
    }

    fn print_stop(&mut self, reason: StopReason) -> Result<()> {
        let message = match reason {
            StopReason::Completed | StopReason::ConversationEnded => "(end of conversation)",
            StopReason::Halted => "(conversation halted)",
            StopReason::Requested => return Ok(()),
        };
        let line = self.paint("2", message);
        self.line(&line)
    }

    fn print_state(&mut self) -> Result<()> {
        let snapshot = self.interpreter.snapshot()?;
        self.line(&format!("Conversation {}", snapshot.conversation))?;
        for (id, name) in &snapshot.characters {
            self.line(&format!("  {id} = {name:?}"))?;
        }
        for (id, value) in &snapshot.numbers {
            self.line(&format!("  {id} = {value}"))?;
        }
        Ok(())
    }

    fn print_help(&mut self) -> Result<()> {
        for line in [
            "Enter         continue",
            "<number>      choose an option",
            ":save [path]  save numbers and names",
            ":load [path]  restore numbers and names",
            ":state        show numbers and names",
            ":quit         stop playing",
        ] {
            self.line(line)?;
        }
        Ok(())
    }

    fn print_banner(&mut self) -> Result<()> {
        let title = self.paint("1;36", "Parley");
        self.line(&format!("{title} v{}", env!("CARGO_PKG_VERSION")))?;
        self.line("Press Enter to continue, type a number to choose, :help for more.\n")
    }

    fn print_error(&mut self, error: &Error) -> Result<()> {
        let line = self.paint("31", &format!("Error: {error}"));
        self.line(&line)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.config.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}").map_err(|e| Error::new(ErrorKind::Io(e.to_string())))
    }
}
