//! ANSI highlighting of parsed scripts.

use parley_foundation::{Token, TokenKind};
use parley_grammar::ParseOutcome;

const RESET: &str = "\x1b[0m";

/// Returns the color for a token kind, or `None` to print it plain.
#[must_use]
pub const fn color_of(kind: &TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::CommandMarker | TokenKind::Keyword(_) => Some("\x1b[1;32m"), // bold green
        TokenKind::Comment => Some("\x1b[2;3m"),                              // dim italic
        TokenKind::String => Some("\x1b[33m"),                                // yellow
        TokenKind::Number => Some("\x1b[35m"),                                // magenta
        TokenKind::Identifier => Some("\x1b[36m"),                            // cyan
        TokenKind::Operator => Some("\x1b[1m"),                               // bold
        TokenKind::Text
        | TokenKind::Word
        | TokenKind::Newline
        | TokenKind::Separator => None,
    }
}

/// Colors a token list. Concatenating the tokens' text reproduces the
/// source they were parsed from.
#[must_use]
pub fn highlight_tokens(tokens: &[Token]) -> String {
    let mut result = String::new();
    for token in tokens {
        match color_of(&token.kind) {
            Some(color) => {
                result.push_str(color);
                result.push_str(&token.text);
                result.push_str(RESET);
            }
            None => result.push_str(&token.text),
        }
    }
    result
}

/// Colors a parsed script, marking any unparsed remainder in red.
#[must_use]
pub fn highlight_script(outcome: &ParseOutcome, text: &str) -> String {
    let mut result = highlight_tokens(&outcome.tokens);
    if let Some(rest) = text.get(outcome.end..).filter(|rest| !rest.is_empty()) {
        result.push_str("\x1b[4;31m"); // underlined red
        result.push_str(rest);
        result.push_str(RESET);
    }
    result
}

/// Formats a token list one token per line, for `--tokens`.
#[must_use]
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut result = String::new();
    for token in tokens {
        result.push_str(&format!(
            "{:>4}:{:<3} {:<20} {:?}\n",
            token.position.line,
            token.position.column,
            token.kind.to_string(),
            token.text
        ));
    }
    result
}

/// Removes ANSI escape sequences.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}
