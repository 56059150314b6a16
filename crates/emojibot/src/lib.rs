//! emojibot - an unbounded emoji catalog served through a few native slots.
//!
//! Users register images under short names; the bot rewrites `:name:` tags
//! in chat messages into native emoji, keeping the most used ones resident
//! and rotating the rest through the platform's limited slots.
//!
//! # Architecture
//!
//! - `emojibot-error` - Error types
//! - `emojibot-core` - Catalog, matching, slot reconciliation and the platform trait
//! - `emojibot-bot` - Message rewrite pipeline and commands
//! - `emojibot-discord` - serenity adapter
//!
//! This crate provides the binary's configuration, logging bootstrap and
//! command handlers.

mod app;
mod cli;
mod config;
mod observability;

pub use app::{LoadedState, check, load_state, run};
pub use cli::{Cli, Commands};
pub use config::{AppConfig, LoggingConfig, TOKEN_ENV};
#[cfg(feature = "observability")]
pub use observability::init_observability_with_config;
pub use observability::{ObservabilityConfig, init, init_tracing};
