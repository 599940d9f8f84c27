//! The load pipeline: parse, scan, preprocess, validate.
//!
//! Loading either produces a complete [`DialogueScript`] or stops at the
//! first problem with a single phase-tagged [`Diagnostic`]. Nothing is
//! partially applied.

use parley_foundation::{Diagnostic, Phase, Position, Token, TokenKind};
use parley_grammar::{Grammar, parse_program};

use crate::catalog::CommandCatalog;
use crate::context::{PreprocessContext, ValidateContext};
use crate::error::CommandError;
use crate::script::{Command, Conversations, DialogueScript};

/// Keyword of the implicit command created for each text line.
pub const TEXT_KEYWORD: &str = "text";

/// Options for loading scripts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadConfig {
    /// Reject a label defined twice in one conversation instead of keeping
    /// the first.
    pub strict_labels: bool,
}

impl LoadConfig {
    /// Sets `strict_labels`.
    #[must_use]
    pub fn with_strict_labels(mut self, strict: bool) -> Self {
        self.strict_labels = strict;
        self
    }
}

/// A command line or text line, before its contract is known.
struct RawCommand {
    keyword: Token,
    arguments: Vec<Token>,
}

/// Turns script text into a [`DialogueScript`].
pub struct Loader<'a> {
    grammar: &'a Grammar,
    catalog: &'a CommandCatalog,
    config: &'a LoadConfig,
}

impl<'a> Loader<'a> {
    /// Creates a loader. `grammar` should have `catalog` projected into it.
    #[must_use]
    pub const fn new(
        grammar: &'a Grammar,
        catalog: &'a CommandCatalog,
        config: &'a LoadConfig,
    ) -> Self {
        Self {
            grammar,
            catalog,
            config,
        }
    }

    /// Loads a script.
    ///
    /// # Errors
    ///
    /// Returns the first Parse, Preprocess, or Validate diagnostic.
    pub fn load(&self, text: &str) -> Result<DialogueScript, Diagnostic> {
        let text = normalize_newlines(text);
        let outcome = parse_program(self.grammar, &text);
        if !outcome.complete {
            return Err(outcome.diagnostics.into_iter().next().unwrap_or_else(|| {
                Diagnostic::parse(Position::at_start(), "script could not be parsed")
            }));
        }

        let raw = scan(&outcome.tokens)?;
        let (commands, conversations) = self.preprocess(raw)?;
        self.validate(&commands, &conversations)?;

        log::debug!(
            "loaded {} tokens into {} commands across {} conversations",
            outcome.tokens.len(),
            commands.len(),
            conversations.len()
        );
        Ok(DialogueScript {
            commands,
            conversations,
            tokens: outcome.tokens,
        })
    }

    fn preprocess(&self, raw: Vec<RawCommand>) -> Result<(Vec<Command>, Conversations), Diagnostic> {
        let mut commands = Vec::with_capacity(raw.len());
        let mut conversations = Conversations::new();
        let mut current = None;

        for RawCommand { keyword, arguments } in raw {
            let Some((contract_index, contract)) = self.catalog.find(&keyword.text) else {
                let error = CommandError::UnknownCommand(keyword.text.clone());
                return Err(command_diagnostic(Phase::Preprocess, &keyword, &error));
            };
            let mut command = Command {
                index: commands.len(),
                keyword,
                contract: contract_index,
                conversation: current,
                arguments,
            };

            let result = contract.check_arguments(&command.arguments).and_then(|()| {
                contract.behavior().preprocess(&mut PreprocessContext {
                    command: &mut command,
                    conversations: &mut conversations,
                    current: &mut current,
                    config: self.config,
                })
            });
            if let Err(error) = result {
                return Err(command_diagnostic(Phase::Preprocess, &command.keyword, &error));
            }
            commands.push(command);
        }

        Ok((commands, conversations))
    }

    fn validate(&self, commands: &[Command], conversations: &Conversations) -> Result<(), Diagnostic> {
        for command in commands {
            let Some(contract) = self.catalog.get(command.contract) else {
                let error = CommandError::UnknownCommand(command.name().to_string());
                return Err(command_diagnostic(Phase::Validate, &command.keyword, &error));
            };
            let ctx = ValidateContext {
                command,
                commands,
                conversations,
            };
            contract
                .behavior()
                .validate(&ctx)
                .map_err(|error| command_diagnostic(Phase::Validate, &command.keyword, &error))?;
        }
        Ok(())
    }
}

/// Rewrites `\r\n` and lone `\r` as `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Builds the `@keyword Error - detail` diagnostic for a command failure.
#[must_use]
pub fn command_diagnostic(phase: Phase, keyword: &Token, error: &CommandError) -> Diagnostic {
    Diagnostic::new(phase, format!("@{} Error - {error}", keyword.text)).with_token(keyword.clone())
}

/// Groups parsed tokens into commands.
fn scan(tokens: &[Token]) -> Result<Vec<RawCommand>, Diagnostic> {
    let mut commands = Vec::new();
    let mut i = 0;

    while let Some(token) = tokens.get(i) {
        i += 1;
        match &token.kind {
            kind if kind.is_trivia() => {}
            TokenKind::Text => commands.push(RawCommand {
                keyword: Token::new(
                    TokenKind::Keyword(TEXT_KEYWORD.to_string()),
                    TEXT_KEYWORD,
                    token.position,
                ),
                arguments: vec![Token::new(
                    TokenKind::Text,
                    token.text.trim(),
                    token.position,
                )],
            }),
            TokenKind::CommandMarker => {
                while tokens.get(i).is_some_and(|t| t.kind == TokenKind::Separator) {
                    i += 1;
                }
                let keyword = match tokens.get(i) {
                    Some(t) if !t.is_trivia() => t.clone(),
                    _ => {
                        return Err(Diagnostic::parse(token.position, "unexpected end of script")
                            .with_token(token.clone()));
                    }
                };
                i += 1;

                let mut arguments = Vec::new();
                while let Some(argument) = tokens.get(i) {
                    match argument.kind {
                        TokenKind::Separator => {}
                        TokenKind::Newline
                        | TokenKind::Comment
                        | TokenKind::CommandMarker
                        | TokenKind::Text => break,
                        _ => arguments.push(argument.unquoted()),
                    }
                    if argument.ends_line {
                        break;
                    }
                    i += 1;
                }
                commands.push(RawCommand { keyword, arguments });
            }
            _ => {
                return Err(
                    Diagnostic::parse(token.position, format!("unexpected {token}"))
                        .with_token(token.clone()),
                );
            }
        }
    }

    Ok(commands)
}
