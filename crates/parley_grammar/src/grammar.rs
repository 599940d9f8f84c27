//! Grammar groups and the rule registry.
//!
//! A [`Grammar`] owns two name-keyed registries: terminals, matched directly
//! against characters, and nonterminals, each a [`Group`] composed of rule
//! references and nested groups. Groups may refer to each other by name, so
//! the rule graph can be recursive.

use std::collections::HashMap;

use parley_foundation::{Error, ErrorKind, Result, TokenKind};

use crate::terminal::{self, Terminal};

/// Names of the rules registered by [`Grammar::core`].
pub mod rules {
    /// Entry point: any number of lines.
    pub const PROGRAM: &str = "program";
    /// One line of script.
    pub const LINE: &str = "line";
    /// A command line or a text line.
    pub const LINE_CONTENT: &str = "line-content";
    /// `@` followed by a command.
    pub const COMMAND_LINE: &str = "command-line";
    /// A keyword command or the generic fallback.
    pub const COMMAND: &str = "command";
    /// Alternation of projected keyword commands.
    pub const KEYWORD_COMMAND: &str = "keyword-command";
    /// Any word followed by arguments.
    pub const GENERIC_COMMAND: &str = "generic-command";
    /// Any single argument.
    pub const ARGUMENT: &str = "argument";
    /// Optional separator then a newline.
    pub const SEPARATOR_NEWLINE: &str = "separator-newline";

    /// Terminal: `\n`.
    pub const NEWLINE: &str = "newline";
    /// Terminal: spaces and tabs.
    pub const SEPARATOR: &str = "separator";
    /// Terminal: spaces and tabs at the very end of the input.
    pub const TRAILING_SEPARATOR: &str = "trailing-separator";
    /// Terminal: `@`.
    pub const COMMAND_MARKER: &str = "command-marker";
    /// Terminal: `// ...`.
    pub const COMMENT: &str = "comment";
    /// Terminal: double-quoted string.
    pub const STRING: &str = "string";
    /// Terminal: free-text line.
    pub const TEXT: &str = "text";
    /// Terminal: identifier.
    pub const ID: &str = "id";
    /// Terminal: numeric literal.
    pub const NUMBER: &str = "number";
    /// Terminal: any chunk.
    pub const WORD: &str = "word";
    /// Terminal: `+ - * /`.
    pub const OPERATOR: &str = "operator";
}

/// A child of a group: a rule reference or a nested group.
#[derive(Clone, Debug)]
pub enum Term {
    /// Reference to a terminal or nonterminal by name.
    Rule(String),
    /// An inline group.
    Group(Group),
}

impl Term {
    /// Creates a rule reference.
    #[must_use]
    pub fn rule(name: impl Into<String>) -> Self {
        Self::Rule(name.into())
    }

    /// Wraps a single rule reference in an optional group.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self::Group(Group::ordered([Self::rule(name)]).optional())
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Self::rule(name)
    }
}

impl From<Group> for Term {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

/// How a group combines its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKind {
    /// Every child must match, one after another.
    Ordered,
    /// The first child that matches wins.
    Alternation,
}

/// A composite grammar rule.
#[derive(Clone, Debug)]
pub struct Group {
    kind: GroupKind,
    optional: bool,
    repeatable: bool,
    children: Vec<Term>,
}

impl Group {
    /// Creates an ordered group.
    #[must_use]
    pub fn ordered(children: impl IntoIterator<Item = Term>) -> Self {
        Self::with_kind(GroupKind::Ordered, children)
    }

    /// Creates an alternation.
    #[must_use]
    pub fn any(children: impl IntoIterator<Item = Term>) -> Self {
        Self::with_kind(GroupKind::Alternation, children)
    }

    fn with_kind(kind: GroupKind, children: impl IntoIterator<Item = Term>) -> Self {
        Self {
            kind,
            optional: false,
            repeatable: false,
            children: children.into_iter().collect(),
        }
    }

    /// Makes this group succeed even when it does not match.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Makes this group match as many times as it can.
    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Appends a child.
    pub fn push(&mut self, term: impl Into<Term>) {
        self.children.push(term.into());
    }

    /// Returns how children are combined.
    #[must_use]
    pub const fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Returns true if the group never fails.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns true if the group repeats.
    #[must_use]
    pub const fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// Returns the children in declared order.
    #[must_use]
    pub fn children(&self) -> &[Term] {
        &self.children
    }
}

/// Registry of terminal and nonterminal rules.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    terminals: HashMap<String, Terminal>,
    nonterminals: HashMap<String, Group>,
}

impl Grammar {
    /// Creates an empty grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the core script grammar.
    ///
    /// `keyword-command` starts empty; a command catalog fills it in.
    #[must_use]
    pub fn core() -> Self {
        use rules::{
            ARGUMENT, COMMAND, COMMAND_LINE, COMMAND_MARKER, COMMENT, GENERIC_COMMAND, ID,
            KEYWORD_COMMAND, LINE, LINE_CONTENT, NEWLINE, NUMBER, OPERATOR, PROGRAM, SEPARATOR,
            SEPARATOR_NEWLINE, STRING, TEXT, TRAILING_SEPARATOR, WORD,
        };

        let mut grammar = Self::new();
        let terminals = [
            (
                NEWLINE,
                Terminal::new(TokenKind::Newline, terminal::scan_newline).crossing_newline(),
            ),
            (
                SEPARATOR,
                Terminal::new(TokenKind::Separator, terminal::scan_separator),
            ),
            (
                TRAILING_SEPARATOR,
                Terminal::new(TokenKind::Separator, terminal::scan_trailing_separator),
            ),
            (
                COMMAND_MARKER,
                Terminal::exact(TokenKind::CommandMarker, "@"),
            ),
            (
                COMMENT,
                Terminal::new(TokenKind::Comment, terminal::scan_comment),
            ),
            (STRING, Terminal::new(TokenKind::String, terminal::scan_string)),
            (TEXT, Terminal::new(TokenKind::Text, terminal::scan_text)),
            (
                ID,
                Terminal::new(TokenKind::Identifier, terminal::scan_identifier),
            ),
            (NUMBER, Terminal::new(TokenKind::Number, terminal::scan_number)),
            (WORD, Terminal::new(TokenKind::Word, terminal::scan_word)),
            (
                OPERATOR,
                Terminal::new(TokenKind::Operator, terminal::scan_operator),
            ),
        ];
        for (name, terminal) in terminals {
            grammar.terminals.insert(name.to_string(), terminal);
        }

        let nonterminals = [
            (PROGRAM, Group::ordered([Term::rule(LINE)]).repeatable()),
            (
                LINE,
                Group::any([
                    Term::rule(SEPARATOR_NEWLINE),
                    Group::ordered([
                        Term::optional(SEPARATOR),
                        Term::rule(LINE_CONTENT),
                        Term::optional(SEPARATOR),
                        Term::optional(COMMENT),
                    ])
                    .into(),
                    Group::ordered([Term::optional(SEPARATOR), Term::rule(COMMENT)]).into(),
                    Term::rule(TRAILING_SEPARATOR),
                ]),
            ),
            (
                LINE_CONTENT,
                Group::any([Term::rule(COMMAND_LINE), Term::rule(TEXT)]),
            ),
            (
                COMMAND_LINE,
                Group::ordered([Term::rule(COMMAND_MARKER), Term::rule(COMMAND)]),
            ),
            (
                COMMAND,
                Group::any([Term::rule(KEYWORD_COMMAND), Term::rule(GENERIC_COMMAND)]),
            ),
            (KEYWORD_COMMAND, Group::any([])),
            (
                GENERIC_COMMAND,
                Group::ordered([Term::rule(WORD), argument_tail()]),
            ),
            (
                ARGUMENT,
                Group::any([
                    Term::rule(STRING),
                    Term::rule(NUMBER),
                    Term::rule(ID),
                    Term::rule(WORD),
                ]),
            ),
            (
                SEPARATOR_NEWLINE,
                Group::ordered([Term::optional(SEPARATOR), Term::rule(NEWLINE)]),
            ),
        ];
        for (name, group) in nonterminals {
            grammar.nonterminals.insert(name.to_string(), group);
        }

        grammar
    }

    /// Registers a terminal. Names must be unique across both registries.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken.
    pub fn add_terminal(&mut self, name: impl Into<String>, terminal: Terminal) -> Result<()> {
        let name = name.into();
        self.ensure_unused(&name)?;
        self.terminals.insert(name, terminal);
        Ok(())
    }

    /// Registers a nonterminal. Names must be unique across both registries.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken.
    pub fn add_nonterminal(&mut self, name: impl Into<String>, group: Group) -> Result<()> {
        let name = name.into();
        self.ensure_unused(&name)?;
        self.nonterminals.insert(name, group);
        Ok(())
    }

    /// Appends an alternative to an existing alternation nonterminal.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a registered alternation.
    pub fn push_alternative(&mut self, name: &str, term: impl Into<Term>) -> Result<()> {
        match self.nonterminals.get_mut(name) {
            Some(group) if group.kind == GroupKind::Alternation => {
                group.push(term);
                Ok(())
            }
            Some(_) => Err(Error::new(ErrorKind::Grammar(format!(
                "rule {name} is not an alternation"
            )))),
            None => Err(Error::new(ErrorKind::Grammar(format!(
                "no rule named {name}"
            )))),
        }
    }

    fn ensure_unused(&self, name: &str) -> Result<()> {
        if self.contains(name) {
            return Err(Error::new(ErrorKind::Grammar(format!(
                "rule {name} is already defined"
            ))));
        }
        Ok(())
    }

    /// Returns true if a rule of either kind has this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.terminals.contains_key(name) || self.nonterminals.contains_key(name)
    }

    /// Looks up a terminal.
    #[must_use]
    pub fn terminal(&self, name: &str) -> Option<&Terminal> {
        self.terminals.get(name)
    }

    /// Looks up a nonterminal.
    #[must_use]
    pub fn nonterminal(&self, name: &str) -> Option<&Group> {
        self.nonterminals.get(name)
    }

    /// Returns every terminal name, sorted.
    #[must_use]
    pub fn terminal_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.terminals.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// `(separator argument)*`
#[must_use]
pub fn argument_tail() -> Term {
    Group::ordered([Term::rule(rules::SEPARATOR), Term::rule(rules::ARGUMENT)])
        .repeatable()
        .into()
}
