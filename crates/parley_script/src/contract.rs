//! Command contracts.
//!
//! A [`CommandContract`] declares what a keyword accepts and how it behaves
//! in each phase. Argument shapes are checked by [`CommandContract::check_arguments`]
//! before any handler runs.

use std::fmt;

use parley_foundation::{Token, TokenKind};
use parley_grammar::rules;

use crate::context::{PreprocessContext, ResolveContext, ValidateContext};
use crate::error::CommandError;

/// A kind of command argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// An identifier like `bob`.
    Identifier,
    /// A numeric literal.
    Number,
    /// A double-quoted string.
    String,
    /// A free-text line.
    Text,
}

impl ArgKind {
    /// Returns the argument kind of a token, if it can be an argument.
    #[must_use]
    pub const fn of(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Identifier => Some(Self::Identifier),
            TokenKind::Number => Some(Self::Number),
            TokenKind::String => Some(Self::String),
            TokenKind::Text => Some(Self::Text),
            _ => None,
        }
    }

    /// Returns the grammar terminal that matches this kind.
    #[must_use]
    pub const fn rule(self) -> &'static str {
        match self {
            Self::Identifier => rules::ID,
            Self::Number => rules::NUMBER,
            Self::String => rules::STRING,
            Self::Text => rules::TEXT,
        }
    }

    /// Order in which kinds are tried when several are accepted.
    const fn precedence(self) -> u8 {
        match self {
            Self::String => 0,
            Self::Number => 1,
            Self::Identifier => 2,
            Self::Text => 3,
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule())
    }
}

/// The accepted kinds of one argument position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentConstraint {
    kinds: Vec<ArgKind>,
    optional: bool,
}

impl ArgumentConstraint {
    /// Creates a required argument accepting any of `kinds`.
    #[must_use]
    pub fn required(kinds: impl IntoIterator<Item = ArgKind>) -> Self {
        let mut kinds: Vec<ArgKind> = kinds.into_iter().collect();
        kinds.sort_by_key(|k| k.precedence());
        kinds.dedup();
        Self {
            kinds,
            optional: false,
        }
    }

    /// Creates an optional argument accepting any of `kinds`.
    #[must_use]
    pub fn optional(kinds: impl IntoIterator<Item = ArgKind>) -> Self {
        Self {
            optional: true,
            ..Self::required(kinds)
        }
    }

    /// Returns the accepted kinds, in matching order.
    #[must_use]
    pub fn kinds(&self) -> &[ArgKind] {
        &self.kinds
    }

    /// Returns true if the argument may be omitted.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns true if the kind is accepted.
    #[must_use]
    pub fn accepts(&self, kind: ArgKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Describes the accepted kinds, like `id or number`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.kinds
            .iter()
            .map(|k| k.rule())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

/// Per-phase handlers for a command.
///
/// Every method defaults to doing nothing, so a behavior only implements
/// the phases it takes part in.
pub trait CommandBehavior {
    /// Runs once per command, in script order, while loading.
    ///
    /// # Errors
    ///
    /// Returns an error to abort the load.
    fn preprocess(&self, ctx: &mut PreprocessContext<'_>) -> Result<(), CommandError> {
        let _ = ctx;
        Ok(())
    }

    /// Runs once per command after every command has been preprocessed.
    ///
    /// # Errors
    ///
    /// Returns an error to abort the load.
    fn validate(&self, ctx: &ValidateContext<'_>) -> Result<(), CommandError> {
        let _ = ctx;
        Ok(())
    }

    /// Runs each time the interpreter reaches the command.
    ///
    /// # Errors
    ///
    /// Returns an error to halt the interpreter.
    fn resolve(&self, ctx: &mut ResolveContext<'_>) -> Result<(), CommandError> {
        let _ = ctx;
        Ok(())
    }
}

/// A keyword, its argument shape, and its behavior.
pub struct CommandContract {
    keyword: String,
    description: String,
    arguments: Vec<ArgumentConstraint>,
    implicit: bool,
    behavior: Box<dyn CommandBehavior>,
}

impl CommandContract {
    /// Creates a contract with no arguments.
    #[must_use]
    pub fn new(keyword: impl Into<String>, behavior: impl CommandBehavior + 'static) -> Self {
        Self {
            keyword: keyword.into(),
            description: String::new(),
            arguments: Vec::new(),
            implicit: false,
            behavior: Box::new(behavior),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends an argument constraint.
    #[must_use]
    pub fn with_argument(mut self, constraint: ArgumentConstraint) -> Self {
        self.arguments.push(constraint);
        self
    }

    /// Marks the contract as having no keyword surface in scripts.
    #[must_use]
    pub fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    /// Returns the keyword.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the argument constraints, in order.
    #[must_use]
    pub fn arguments(&self) -> &[ArgumentConstraint] {
        &self.arguments
    }

    /// Returns true if the contract is not projected into the grammar.
    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// Returns the behavior.
    #[must_use]
    pub fn behavior(&self) -> &dyn CommandBehavior {
        self.behavior.as_ref()
    }

    /// Checks argument count and kinds against the constraints.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found.
    pub fn check_arguments(&self, arguments: &[Token]) -> Result<(), CommandError> {
        if arguments.len() > self.arguments.len() {
            return Err(CommandError::TooManyArguments(self.arguments.len()));
        }
        for (i, constraint) in self.arguments.iter().enumerate() {
            match arguments.get(i) {
                None if constraint.is_optional() => {}
                None => return Err(CommandError::MissingArguments(constraint.describe())),
                Some(token) => {
                    if !ArgKind::of(&token.kind).is_some_and(|k| constraint.accepts(k)) {
                        return Err(CommandError::InvalidArgumentType {
                            found: token.kind.name().to_string(),
                            text: token.text.clone(),
                            expected: constraint.describe(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns a usage line like `@jumpeq <id> <number|id> <number|id>`.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut usage = format!("@{}", self.keyword);
        for constraint in &self.arguments {
            let kinds = constraint
                .kinds()
                .iter()
                .map(|k| k.rule())
                .collect::<Vec<_>>()
                .join("|");
            if constraint.is_optional() {
                usage.push_str(&format!(" [{kinds}]"));
            } else {
                usage.push_str(&format!(" <{kinds}>"));
            }
        }
        usage
    }
}

impl fmt::Debug for CommandContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContract")
            .field("keyword", &self.keyword)
            .field("arguments", &self.arguments)
            .field("implicit", &self.implicit)
            .finish_non_exhaustive()
    }
}
