//! Error types for emojibot.
//!
//! This crate provides the error taxonomy shared by every emojibot crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! User-facing failures live in [`CommandErrorKind`]; their display strings
//! are the notices posted back to the channel.
//!
//! # Examples
//!
//! ```
//! use emojibot_error::{CommandError, CommandErrorKind, EmojibotResult};
//!
//! fn remove(name: &str) -> EmojibotResult<()> {
//!     Err(CommandError::new(CommandErrorKind::NotFound(name.to_string())))?
//! }
//!
//! assert!(remove("party").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod command;
mod config;
mod error;
mod platform;

pub use catalog::{CatalogError, CatalogErrorKind};
pub use command::{CommandError, CommandErrorKind};
pub use config::ConfigError;
pub use error::{EmojibotError, EmojibotErrorKind, EmojibotResult};
pub use platform::{PlatformError, PlatformErrorKind};
