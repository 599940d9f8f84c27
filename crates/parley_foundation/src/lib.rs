//! Core value types shared by every Parley layer.
//!
//! This crate provides:
//! - [`Position`] and [`Source`] - Offsets with lazily derived line/column
//! - [`Token`] - Immutable tokens produced by the grammar matcher
//! - [`Diagnostic`] - Phase-tagged load and runtime diagnostics
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostic;
pub mod error;
pub mod position;
pub mod token;

pub use diagnostic::{Diagnostic, Phase};
pub use error::{Error, ErrorKind, Result};
pub use position::{Position, Source};
pub use token::{Token, TokenKind};
