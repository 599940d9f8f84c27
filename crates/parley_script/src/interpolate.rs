//! `%id` substitution in dialogue text.

use parley_grammar::terminal::is_id_char;

/// Text with its `%id` references substituted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interpolated {
    /// The substituted text.
    pub text: String,
    /// Ids that had no value, in order of appearance.
    pub unresolved: Vec<String>,
}

/// Replaces each `%id` in `text` with `lookup(id)`.
///
/// `\%` produces a literal `%`. A `%` not followed by id characters is kept
/// as is, and ids with no value stay as `%id`.
pub fn interpolate(text: &str, lookup: impl Fn(&str) -> Option<String>) -> Interpolated {
    let mut out = String::with_capacity(text.len());
    let mut unresolved = Vec::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '\\' && rest[1..].starts_with('%') {
            out.push('%');
            rest = &rest[2..];
            continue;
        }
        if c == '%' {
            let after = &rest[1..];
            let len = after.find(|c: char| !is_id_char(c)).unwrap_or(after.len());
            if len > 0 {
                let id = &after[..len];
                if let Some(value) = lookup(id) {
                    out.push_str(&value);
                } else {
                    out.push('%');
                    out.push_str(id);
                    unresolved.push(id.to_string());
                }
                rest = &after[len..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Interpolated {
        text: out,
        unresolved,
    }
}
