//! Token types for Parley scripts.
//!
//! Tokens are the output of the grammar matcher and the input to the loader.
//! Lexing and parsing are one pass, so every token records which terminal
//! produced it.

use std::fmt;

use crate::position::Position;

/// A token produced by matching a terminal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The terminal kind that produced this token.
    pub kind: TokenKind,
    /// The literal text matched.
    pub text: String,
    /// Where the token starts.
    pub position: Position,
    /// True if the token's terminal crosses a line break.
    pub ends_line: bool,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
            ends_line: false,
        }
    }

    /// Marks this token as crossing a line break.
    #[must_use]
    pub fn ending_line(mut self) -> Self {
        self.ends_line = true;
        self
    }

    /// Returns the byte offset one past the end of this token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.position.offset + self.text.len()
    }

    /// Returns a copy of this token with string quotes removed.
    ///
    /// Tokens of any other kind are returned unchanged.
    #[must_use]
    pub fn unquoted(&self) -> Self {
        let mut token = self.clone();
        if self.kind == TokenKind::String {
            let inner = self
                .text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(&self.text);
            token.text = inner.to_string();
        }
        token
    }

    /// Returns true if this token carries no meaning for the loader.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.text.escape_debug())
    }
}

/// Token kinds, one per built-in terminal plus projected keywords.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// `\n`
    Newline,
    /// Run of spaces and tabs between tokens.
    Separator,
    /// `@`, introducing a command line.
    CommandMarker,
    /// `// ...` to end of line.
    Comment,
    /// A free-text line.
    Text,
    /// `"..."` including its quotes.
    String,
    /// Identifier like `bob` or `first-choice`.
    Identifier,
    /// Numeric literal like `5` or `-0.25`.
    Number,
    /// Any other whitespace-delimited chunk.
    Word,
    /// Single-character operator: `+ - * /`.
    Operator,
    /// A command keyword like `jump`.
    Keyword(String),
}

impl TokenKind {
    /// Returns true for kinds the loader skips between meaningful tokens.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Newline | Self::Separator | Self::Comment)
    }

    /// Returns the short name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Newline => "newline",
            Self::Separator => "separator",
            Self::CommandMarker => "command-marker",
            Self::Comment => "comment",
            Self::Text => "text",
            Self::String => "string",
            Self::Identifier => "id",
            Self::Number => "number",
            Self::Word => "word",
            Self::Operator => "operator",
            Self::Keyword(_) => "keyword",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(name) => write!(f, "keyword {name}"),
            other => f.write_str(other.name()),
        }
    }
}
