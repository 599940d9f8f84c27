//! Grammar registry and backtracking matcher for Parley scripts.
//!
//! This crate provides:
//! - Terminal matchers - pure functions recognizing characters
//! - `Grammar` - named terminal and nonterminal rules
//! - `Matcher` - the recursive matcher producing flat token lists
//! - `parse_program` - the single parse entry point

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod grammar;
pub mod matcher;
pub mod terminal;

pub use grammar::{Grammar, Group, GroupKind, Term, argument_tail, rules};
pub use matcher::{MatchResult, Matcher, ParseOutcome, parse_program};
pub use terminal::{ScanFn, Terminal, TerminalRule};
