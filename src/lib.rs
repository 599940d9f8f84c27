//! Parley - Dialogue scripting for games
//!
//! This crate re-exports all layers of the Parley system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: parley_runtime    — Terminal player, CLI, save files
//! Layer 2: parley_script     — Commands, load pipeline, interpreter
//! Layer 1: parley_grammar    — Grammar registry, backtracking matcher
//! Layer 0: parley_foundation — Core types (Token, Diagnostic, Error)
//! ```

pub use parley_foundation as foundation;
pub use parley_grammar as grammar;
pub use parley_runtime as runtime;
pub use parley_script as script;
