//! Terminal player, CLI, and save files for Parley.
//!
//! This crate provides:
//! - [`Player`] - Plays a conversation in the terminal
//! - [`PlayerConfig`] - How the player presents it
//! - Token highlighting for the `parley` CLI
//! - Snapshot serialization to `MessagePack`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod highlight;
pub mod player;
pub mod serialize;

pub use config::PlayerConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::{dump_tokens, highlight_script, highlight_tokens, strip_ansi};
pub use player::{Player, PlayerCommand};
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
