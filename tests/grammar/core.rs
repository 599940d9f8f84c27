//! Core grammar tests, before any command keyword is projected.

use parley_foundation::TokenKind;
use parley_grammar::{Grammar, Group, Term, Terminal, parse_program, rules};

fn kinds(text: &str) -> Vec<TokenKind> {
    parse_program(&Grammar::core(), text)
        .tokens
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn empty_script_is_complete() {
    let outcome = parse_program(&Grammar::core(), "");
    assert!(outcome.complete);
    assert!(outcome.tokens.is_empty());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn generic_commands_parse_as_words() {
    assert_eq!(
        kinds("@jump end\n"),
        [
            TokenKind::CommandMarker,
            TokenKind::Word,
            TokenKind::Separator,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn argument_kinds() {
    assert_eq!(
        kinds("@x \"a b\" 4.5 name +"),
        [
            TokenKind::CommandMarker,
            TokenKind::Word,
            TokenKind::Separator,
            TokenKind::String,
            TokenKind::Separator,
            TokenKind::Number,
            TokenKind::Separator,
            TokenKind::Identifier,
            TokenKind::Separator,
            TokenKind::Word,
        ]
    );
}

#[test]
fn text_lines_and_comments() {
    assert_eq!(
        kinds("  Hello there // aside\n// only a comment\n\n"),
        [
            TokenKind::Separator,
            TokenKind::Text,
            TokenKind::Comment,
            TokenKind::Newline,
            TokenKind::Comment,
            TokenKind::Newline,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn tokens_reproduce_the_script() {
    let text = "@conversation A // c\n\t@enter bob \"Bob\"\n  Hi %bob!\n\n@jump end  \n";
    let outcome = parse_program(&Grammar::core(), text);
    assert!(outcome.complete);
    let rebuilt: String = outcome.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(rebuilt, text);
}

#[test]
fn positions_are_one_based() {
    let outcome = parse_program(&Grammar::core(), "First\n  @jump end");
    let jump = outcome
        .tokens
        .iter()
        .find(|t| t.text == "jump")
        .unwrap();
    assert_eq!((jump.position.line, jump.position.column), (2, 4));
}

#[test]
fn host_rules_extend_the_grammar() {
    let mut grammar = Grammar::core();
    grammar
        .add_terminal("shout", Terminal::keyword("shout"))
        .unwrap();
    grammar
        .add_nonterminal(
            "shout-command",
            Group::ordered([Term::rule("shout"), parley_grammar::argument_tail()]),
        )
        .unwrap();
    grammar
        .push_alternative(rules::KEYWORD_COMMAND, "shout-command")
        .unwrap();

    let outcome = parse_program(&grammar, "@shout loud\n@shouting\n");
    assert!(outcome.complete);
    let words: Vec<_> = outcome
        .tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Keyword(_) | TokenKind::Word))
        .map(|t| (t.kind.clone(), t.text.as_str()))
        .collect();
    assert_eq!(
        words,
        [
            (TokenKind::Keyword("shout".into()), "shout"),
            (TokenKind::Word, "shouting"),
        ]
    );
}

#[test]
fn names_are_unique_across_registries() {
    let mut grammar = Grammar::core();
    assert!(
        grammar
            .add_terminal(rules::LINE, Terminal::keyword("line"))
            .is_err()
    );
    assert!(
        grammar
            .add_nonterminal(rules::TEXT, Group::any([]))
            .is_err()
    );
}
