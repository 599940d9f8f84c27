//! Integration tests for the parley_script crate.
//!
//! Tests for loading and running scripts:
//! - Load pipeline diagnostics
//! - Interpreter control flow and suspension
//! - Host-registered commands
//! - Listeners and snapshots

mod host_commands;
mod loading;
mod playback;
mod state;
