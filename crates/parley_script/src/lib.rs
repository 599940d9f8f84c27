//! Commands, the load pipeline, and the suspendable interpreter for Parley
//! scripts.
//!
//! This crate provides:
//! - [`CommandCatalog`] - Command contracts and their grammar projection
//! - [`Loader`] - Parse, preprocess, and validate passes producing a
//!   [`DialogueScript`]
//! - [`Interpreter`] - Runs conversations, suspending for the host
//! - [`Notification`] and [`EventEmitter`] - What the host renders
//! - [`Snapshot`] - Conversation state that outlives a session

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod commands;
pub mod context;
pub mod contract;
pub mod error;
pub mod events;
pub mod interpolate;
pub mod interpreter;
pub mod loader;
pub mod script;
pub mod snapshot;

pub use catalog::CommandCatalog;
pub use context::{Cursor, PendingOption, PreprocessContext, ResolveContext, ValidateContext};
pub use contract::{ArgKind, ArgumentConstraint, CommandBehavior, CommandContract};
pub use error::CommandError;
pub use events::{EventEmitter, ListenerId, Notification, NotificationKind, Severity};
pub use interpolate::{Interpolated, interpolate};
pub use interpreter::{Interpreter, State, StopReason};
pub use loader::{LoadConfig, Loader, TEXT_KEYWORD, normalize_newlines};
pub use script::{Command, Conversation, ConversationId, Conversations, DialogueScript};
pub use snapshot::Snapshot;
