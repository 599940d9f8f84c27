//! Phase-tagged diagnostics.
//!
//! Diagnostics are accumulated by the matcher and raised by the loader and
//! interpreter. Once created they are never changed.

use std::fmt;

use thiserror::Error;

use crate::position::Position;
use crate::token::Token;

/// The pipeline phase that produced a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Input does not match the grammar.
    Parse,
    /// Structural error during the first load pass.
    Preprocess,
    /// Cross-reference error once all labels are known.
    Validate,
    /// Runtime error while executing a command.
    Resolve,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parse => "Parse",
            Self::Preprocess => "Preprocess",
            Self::Validate => "Validate",
            Self::Resolve => "Resolve",
        })
    }
}

/// A single diagnostic message.
#[derive(Clone, Debug, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// The phase that raised this diagnostic.
    pub phase: Phase,
    /// The token the diagnostic is about, if any.
    pub token: Option<Token>,
    /// Where the problem was detected, if known.
    pub position: Option<Position>,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic with no location.
    #[must_use]
    pub fn new(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            phase,
            token: None,
            position: None,
            message: message.into(),
        }
    }

    /// Creates a parse diagnostic at the given position.
    #[must_use]
    pub fn parse(position: Position, message: impl Into<String>) -> Self {
        Self::new(Phase::Parse, message).at(position)
    }

    /// Attaches a token, taking its position.
    #[must_use]
    pub fn with_token(mut self, token: Token) -> Self {
        self.position = Some(token.position);
        self.token = Some(token);
        self
    }

    /// Sets the position.
    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.phase)?;
        if let Some(position) = &self.position {
            write!(f, "{position}: ")?;
        }
        f.write_str(&self.message)
    }
}
