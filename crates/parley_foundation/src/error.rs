//! Error types for the Parley system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use thiserror::Error;

use crate::diagnostic::Diagnostic;

/// The main error type for Parley operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates an error for a failed load.
    #[must_use]
    pub fn load(diagnostic: Diagnostic) -> Self {
        Self::new(ErrorKind::Load(diagnostic))
    }

    /// Creates an unknown conversation error.
    #[must_use]
    pub fn unknown_conversation(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownConversation(name.into()))
    }

    /// Creates an error for an option whose label is missing.
    #[must_use]
    pub fn unknown_label(label: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownLabel(label.into()))
    }

    /// Creates an option index error.
    #[must_use]
    pub fn option_out_of_range(index: usize, len: usize) -> Self {
        Self::new(ErrorKind::OptionOutOfRange { index, len })
    }

    /// Returns the load diagnostic, if this error came from a failed load.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match &self.kind {
            ErrorKind::Load(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}

impl From<Diagnostic> for Error {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::load(diagnostic)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Parsing, preprocessing, or validation rejected a script.
    #[error("load failed: {0}")]
    Load(Diagnostic),

    /// An operation needed a loaded script.
    #[error("no script is loaded")]
    NoScript,

    /// The named conversation does not exist in the loaded script.
    #[error("no conversation found by the name {0}")]
    UnknownConversation(String),

    /// An operation needed an active conversation.
    #[error("there is no current conversation")]
    NoActiveConversation,

    /// An operation needed the cursor to be waiting for input.
    #[error("the conversation is not waiting for input")]
    NotSuspended,

    /// Chosen option index is outside the pending options.
    #[error("option {index} out of range ({len} pending)")]
    OptionOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The number of pending options.
        len: usize,
    },

    /// A chosen option targets a label the active conversation lacks.
    #[error("no label named {0} in the active conversation")]
    UnknownLabel(String),

    /// The grammar registry rejected a rule.
    #[error("grammar error: {0}")]
    Grammar(String),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// State could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Parley operations.
pub type Result<T> = std::result::Result<T, Error>;
