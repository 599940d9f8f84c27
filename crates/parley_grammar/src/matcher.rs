//! The backtracking grammar matcher.
//!
//! The matcher walks the rule graph of a [`Grammar`] directly against the
//! source text. There is no separate lexing pass: every terminal match
//! becomes a token, and a successful match is the flat, in-order list of
//! those tokens.
//!
//! Semantics:
//!
//! * ordered groups need every child to match contiguously;
//! * alternations commit to the first child that matches (ordered choice);
//! * optional groups never fail and drop the diagnostics of a failed try;
//! * repeatable groups match greedily and stop on the first failed or
//!   empty iteration, which is dropped.
//!
//! The matcher also remembers the furthest offset at which a terminal
//! failed and which terminals were tried there. That is what the final
//! "unexpected ... expected one of ..." diagnostic reports.

use parley_foundation::{Diagnostic, Position, Source, Token};

use crate::grammar::{Grammar, Group, GroupKind, Term, rules};

/// The result of matching a rule or group.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    /// Tokens produced, in source order.
    pub tokens: Vec<Token>,
    /// Byte offset one past the match.
    pub end: usize,
    /// Whether the rule matched.
    pub success: bool,
    /// Diagnostics explaining a failure.
    pub diagnostics: Vec<Diagnostic>,
}

impl MatchResult {
    fn matched(offset: usize) -> Self {
        Self {
            tokens: Vec::new(),
            end: offset,
            success: true,
            diagnostics: Vec::new(),
        }
    }

    fn failed(offset: usize, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            tokens: Vec::new(),
            end: offset,
            success: false,
            diagnostics,
        }
    }
}

/// The furthest point a terminal failed to match.
#[derive(Debug, Default)]
struct Furthest {
    offset: usize,
    expected: Vec<String>,
}

impl Furthest {
    fn record(&mut self, offset: usize, name: &str) {
        if offset > self.offset {
            self.offset = offset;
            self.expected.clear();
        }
        if offset == self.offset && !self.expected.iter().any(|e| e == name) {
            self.expected.push(name.to_string());
        }
    }
}

/// Matches grammar rules against one source.
pub struct Matcher<'a> {
    grammar: &'a Grammar,
    source: &'a Source,
    furthest: Furthest,
}

impl<'a> Matcher<'a> {
    /// Creates a matcher over the given source.
    #[must_use]
    pub fn new(grammar: &'a Grammar, source: &'a Source) -> Self {
        Self {
            grammar,
            source,
            furthest: Furthest::default(),
        }
    }

    /// Matches a named rule at `offset`.
    ///
    /// Nonterminals are looked up before terminals.
    pub fn match_rule(&mut self, name: &str, offset: usize) -> MatchResult {
        let grammar = self.grammar;
        if let Some(group) = grammar.nonterminal(name) {
            return self.match_group(group, offset);
        }
        let Some(terminal) = grammar.terminal(name) else {
            let diagnostic =
                Diagnostic::parse(self.position(offset), format!("unknown rule {name}"));
            return MatchResult::failed(offset, vec![diagnostic]);
        };

        let text = self.source.text();
        match terminal.scan(text, offset) {
            Some(len) => {
                let mut token = Token::new(
                    terminal.kind().clone(),
                    &text[offset..offset + len],
                    self.position(offset),
                );
                if terminal.crosses_newline() {
                    token = token.ending_line();
                }
                MatchResult {
                    tokens: vec![token],
                    end: offset + len,
                    success: true,
                    diagnostics: Vec::new(),
                }
            }
            None => {
                self.furthest.record(offset, name);
                let diagnostic =
                    Diagnostic::parse(self.position(offset), format!("expected {name}"));
                MatchResult::failed(offset, vec![diagnostic])
            }
        }
    }

    /// Matches a group at `offset`, honoring its optional and repeatable
    /// flags.
    pub fn match_group(&mut self, group: &Group, offset: usize) -> MatchResult {
        if group.is_repeatable() {
            let mut result = MatchResult::matched(offset);
            loop {
                let iteration = self.match_once(group, result.end);
                if !iteration.success || iteration.end == result.end {
                    break;
                }
                result.tokens.extend(iteration.tokens);
                result.end = iteration.end;
            }
            return result;
        }

        let result = self.match_once(group, offset);
        if !result.success && group.is_optional() {
            return MatchResult::matched(offset);
        }
        result
    }

    fn match_term(&mut self, term: &Term, offset: usize) -> MatchResult {
        match term {
            Term::Rule(name) => self.match_rule(name, offset),
            Term::Group(group) => self.match_group(group, offset),
        }
    }

    fn match_once(&mut self, group: &Group, offset: usize) -> MatchResult {
        match group.kind() {
            GroupKind::Ordered => {
                let mut result = MatchResult::matched(offset);
                for child in group.children() {
                    let step = self.match_term(child, result.end);
                    if !step.success {
                        return MatchResult::failed(offset, step.diagnostics);
                    }
                    result.tokens.extend(step.tokens);
                    result.end = step.end;
                }
                result
            }
            GroupKind::Alternation => {
                let mut diagnostics = Vec::new();
                for child in group.children() {
                    let attempt = self.match_term(child, offset);
                    if attempt.success {
                        return attempt;
                    }
                    diagnostics.extend(attempt.diagnostics);
                }
                MatchResult::failed(offset, diagnostics)
            }
        }
    }

    fn position(&self, offset: usize) -> Position {
        self.source.position(offset)
    }

    /// Builds the diagnostic for input that stopped matching at `end`.
    #[must_use]
    pub fn unexpected(&self, end: usize) -> Diagnostic {
        let offset = self.furthest.offset.max(end);
        let text = self.source.text();
        let rest = text.get(offset..).unwrap_or_default();
        let found = match rest.lines().next() {
            None => "end of script".to_string(),
            Some("") => "end of line".to_string(),
            Some(line) => {
                let excerpt: String = line.chars().take(24).collect();
                format!("\"{}\"", excerpt.escape_debug())
            }
        };
        let message = if offset == self.furthest.offset && !self.furthest.expected.is_empty() {
            format!(
                "unexpected {found}, expected one of: {}",
                self.furthest.expected.join(", ")
            )
        } else {
            format!("unexpected {found}")
        };
        Diagnostic::parse(self.position(offset), message)
    }
}

/// The outcome of parsing a whole program.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutcome {
    /// Every token matched, trivia included.
    pub tokens: Vec<Token>,
    /// Parse diagnostics. Empty when the parse is complete.
    pub diagnostics: Vec<Diagnostic>,
    /// Byte offset where matching stopped.
    pub end: usize,
    /// True if the whole input matched.
    pub complete: bool,
}

impl ParseOutcome {
    /// Returns the first diagnostic, if any.
    #[must_use]
    pub fn first_diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }
}

/// Parses `text` from the `program` rule.
#[must_use]
pub fn parse_program(grammar: &Grammar, text: &str) -> ParseOutcome {
    let source = Source::new(text);
    let mut matcher = Matcher::new(grammar, &source);
    let result = matcher.match_rule(rules::PROGRAM, 0);
    let complete = result.success && result.end == text.len();

    let mut diagnostics = result.diagnostics;
    if !complete {
        diagnostics.push(matcher.unexpected(result.end));
    }
    log::trace!(
        "parsed {} tokens, stopped at {} of {} bytes",
        result.tokens.len(),
        result.end,
        text.len()
    );

    ParseOutcome {
        tokens: result.tokens,
        diagnostics,
        end: result.end,
        complete,
    }
}
