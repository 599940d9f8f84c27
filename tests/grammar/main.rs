//! Integration tests for the parley_grammar crate.
//!
//! Tests for the grammar-driven parser:
//! - Core grammar shapes
//! - Catalog projection of command keywords
//! - Diagnostics for scripts that do not parse

mod core;
mod diagnostics;
mod projection;
