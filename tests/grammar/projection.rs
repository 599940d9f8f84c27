//! Tests for the grammar a command catalog projects.

use parley_foundation::TokenKind;
use parley_grammar::{Grammar, parse_program};
use parley_script::{ArgKind, ArgumentConstraint, CommandBehavior, CommandCatalog, CommandContract};

struct Inert;
impl CommandBehavior for Inert {}

fn grammar() -> Grammar {
    CommandCatalog::standard().grammar().unwrap()
}

fn keywords(grammar: &Grammar, text: &str) -> Vec<String> {
    parse_program(grammar, text)
        .tokens
        .into_iter()
        .filter_map(|t| match t.kind {
            TokenKind::Keyword(k) => Some(k),
            _ => None,
        })
        .collect()
}

#[test]
fn every_builtin_keyword_is_recognized() {
    let grammar = grammar();
    let script = "\
@conversation A
@label top
@enter bob \"Bob\"
@speak bob
@option top \"Again\"
@jump top
@jumpeq top n 1
@jumpgt top n 1
@return
@event bang
@number n 1
@add n 1
@mul n 2
@div n 2
";
    assert_eq!(
        keywords(&grammar, script),
        [
            "conversation",
            "label",
            "enter",
            "speak",
            "option",
            "jump",
            "jumpeq",
            "jumpgt",
            "return",
            "event",
            "number",
            "add",
            "mul",
            "div",
        ]
    );
}

#[test]
fn keywords_need_a_boundary() {
    let grammar = grammar();
    assert!(keywords(&grammar, "@jumping top").is_empty());
    assert!(keywords(&grammar, "@returned").is_empty());
}

#[test]
fn text_is_never_a_keyword() {
    let grammar = grammar();
    assert!(keywords(&grammar, "@text hello").is_empty());
}

#[test]
fn argument_kinds_follow_the_contract() {
    let grammar = grammar();
    let outcome = parse_program(&grammar, "@number gold -5");
    let kinds: Vec<_> = outcome
        .tokens
        .iter()
        .filter(|t| !t.is_trivia())
        .map(|t| t.kind.clone())
        .collect();
    assert_eq!(
        kinds,
        [
            TokenKind::CommandMarker,
            TokenKind::Keyword("number".into()),
            TokenKind::Identifier,
            TokenKind::Number,
        ]
    );
}

#[test]
fn surplus_and_missing_arguments_still_parse() {
    let grammar = grammar();
    assert!(parse_program(&grammar, "@jump a b c").complete);
    assert!(parse_program(&grammar, "@option").complete);
}

#[test]
fn host_commands_project_like_builtins() {
    let mut catalog = CommandCatalog::standard();
    catalog
        .register(
            CommandContract::new("wait", Inert)
                .with_argument(ArgumentConstraint::required([ArgKind::Number])),
        )
        .unwrap();
    let grammar = catalog.grammar().unwrap();
    assert_eq!(keywords(&grammar, "@wait 3\n@jump x"), ["wait", "jump"]);
    assert!(grammar.nonterminal("wait-command").is_some());
}
