//! Terminal matchers.
//!
//! A terminal recognizes characters directly. Every matcher is a pure
//! function of the source text and a starting byte offset that returns the
//! byte length of the match, or `None`.

use parley_foundation::TokenKind;

/// Signature shared by all scanning terminals.
pub type ScanFn = fn(&str, usize) -> Option<usize>;

/// How a terminal recognizes its input.
#[derive(Clone, Debug)]
pub enum TerminalRule {
    /// Matches a fixed literal.
    Exact {
        /// The literal to match.
        literal: String,
        /// Whether a token boundary must follow the literal.
        boundary: bool,
    },
    /// Matches with a scanning function.
    Scan(ScanFn),
}

/// A terminal grammar rule.
#[derive(Clone, Debug)]
pub struct Terminal {
    kind: TokenKind,
    rule: TerminalRule,
    crosses_newline: bool,
}

impl Terminal {
    /// Creates a terminal backed by a scanning function.
    #[must_use]
    pub fn new(kind: TokenKind, scan: ScanFn) -> Self {
        Self {
            kind,
            rule: TerminalRule::Scan(scan),
            crosses_newline: false,
        }
    }

    /// Creates a terminal that matches `literal` exactly.
    #[must_use]
    pub fn exact(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            rule: TerminalRule::Exact {
                literal: literal.into(),
                boundary: false,
            },
            crosses_newline: false,
        }
    }

    /// Creates a keyword terminal.
    ///
    /// Keywords only match when followed by a token boundary, so `jump`
    /// never matches the start of `jumpeq`.
    #[must_use]
    pub fn keyword(keyword: &str) -> Self {
        Self {
            kind: TokenKind::Keyword(keyword.to_string()),
            rule: TerminalRule::Exact {
                literal: keyword.to_string(),
                boundary: true,
            },
            crosses_newline: false,
        }
    }

    /// Marks this terminal as consuming a line break.
    #[must_use]
    pub fn crossing_newline(mut self) -> Self {
        self.crosses_newline = true;
        self
    }

    /// Returns the kind of token this terminal produces.
    #[must_use]
    pub const fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Returns the matching rule.
    #[must_use]
    pub const fn rule(&self) -> &TerminalRule {
        &self.rule
    }

    /// Returns true if a match consumes a line break.
    #[must_use]
    pub const fn crosses_newline(&self) -> bool {
        self.crosses_newline
    }

    /// Returns the byte length matched at `offset`, if any.
    #[must_use]
    pub fn scan(&self, text: &str, offset: usize) -> Option<usize> {
        if offset > text.len() || !text.is_char_boundary(offset) {
            return None;
        }
        match &self.rule {
            TerminalRule::Exact { literal, boundary } => {
                if literal.is_empty() || !text[offset..].starts_with(literal.as_str()) {
                    return None;
                }
                let end = offset + literal.len();
                (!boundary || is_boundary(text, end)).then_some(literal.len())
            }
            TerminalRule::Scan(scan) => scan(text, offset).filter(|&len| len > 0),
        }
    }
}

/// Characters allowed in identifiers.
#[must_use]
pub fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Characters that separate tokens on a line.
#[must_use]
pub const fn is_separator_char(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

fn is_whitespace(c: char) -> bool {
    is_separator_char(c) || c == '\n'
}

fn starts_comment(text: &str, offset: usize) -> bool {
    text[offset..].starts_with("//")
}

/// Returns true if a token may end at `offset`.
#[must_use]
pub fn is_boundary(text: &str, offset: usize) -> bool {
    match text[offset..].chars().next() {
        None => true,
        Some(c) if is_whitespace(c) => true,
        Some(_) => starts_comment(text, offset),
    }
}

/// Returns the end of the whitespace-delimited chunk starting at `offset`.
fn chunk_end(text: &str, offset: usize) -> usize {
    let mut end = offset;
    while !is_boundary(text, end) {
        // is_boundary returned false, so a character follows
        end += text[end..].chars().next().map_or(1, char::len_utf8);
    }
    end
}

/// Scans a single `\n`.
#[must_use]
pub fn scan_newline(text: &str, offset: usize) -> Option<usize> {
    text[offset..].starts_with('\n').then_some(1)
}

/// Scans a run of spaces and tabs.
#[must_use]
pub fn scan_separator(text: &str, offset: usize) -> Option<usize> {
    let len: usize = text[offset..]
        .chars()
        .take_while(|&c| is_separator_char(c))
        .map(char::len_utf8)
        .sum();
    (len > 0).then_some(len)
}

/// Scans a run of spaces and tabs that ends the input.
#[must_use]
pub fn scan_trailing_separator(text: &str, offset: usize) -> Option<usize> {
    scan_separator(text, offset).filter(|&len| offset + len == text.len())
}

/// Scans a `//` comment up to, not including, the end of the line.
#[must_use]
pub fn scan_comment(text: &str, offset: usize) -> Option<usize> {
    if !starts_comment(text, offset) {
        return None;
    }
    let rest = &text[offset..];
    Some(rest.find('\n').unwrap_or(rest.len()))
}

/// Scans a double-quoted string. Strings have no escapes and may not span
/// lines.
#[must_use]
pub fn scan_string(text: &str, offset: usize) -> Option<usize> {
    let rest = text[offset..].strip_prefix('"')?;
    let close = rest.find(['"', '\n'])?;
    (rest[close..].starts_with('"')).then_some(close + 2)
}

/// Scans a free-text line.
///
/// Text lines start a line (only separators may precede them), never start
/// with `@`, stop at a newline or comment, and are not blank.
#[must_use]
pub fn scan_text(text: &str, offset: usize) -> Option<usize> {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    if !text[line_start..offset].chars().all(is_separator_char) {
        return None;
    }
    let rest = &text[offset..];
    if rest.trim_start_matches(is_separator_char).starts_with('@') {
        return None;
    }
    let mut len = 0;
    for (i, c) in rest.char_indices() {
        if c == '\n' || rest[i..].starts_with("//") {
            break;
        }
        len = i + c.len_utf8();
    }
    let line = &rest[..len];
    (!line.trim().is_empty()).then_some(len)
}

/// Scans an identifier: a chunk of `[A-Za-z0-9_-]` not starting with a digit.
#[must_use]
pub fn scan_identifier(text: &str, offset: usize) -> Option<usize> {
    let end = chunk_end(text, offset);
    let chunk = &text[offset..end];
    let first = chunk.chars().next()?;
    if first.is_ascii_digit() || !chunk.chars().all(is_id_char) {
        return None;
    }
    Some(chunk.len())
}

/// Scans a numeric literal: a chunk shaped like `[+-]?digits[.digits]`.
#[must_use]
pub fn scan_number(text: &str, offset: usize) -> Option<usize> {
    let end = chunk_end(text, offset);
    let chunk = &text[offset..end];
    let unsigned = chunk.strip_prefix(['+', '-']).unwrap_or(chunk);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !digits(whole) || fraction.is_some_and(|f| !digits(f)) {
        return None;
    }
    Some(chunk.len())
}

/// Scans any whitespace-delimited chunk.
#[must_use]
pub fn scan_word(text: &str, offset: usize) -> Option<usize> {
    let end = chunk_end(text, offset);
    (end > offset).then_some(end - offset)
}

/// Scans a single-character operator.
#[must_use]
pub fn scan_operator(text: &str, offset: usize) -> Option<usize> {
    text[offset..]
        .starts_with(['+', '-', '*', '/'])
        .then_some(1)
}
