//! Message rewrite pipeline for emojibot.
//!
//! Takes platform-neutral [`IncomingMessage`](emojibot_core::IncomingMessage)s
//! and decides, per message, whether to bind a pending upload, run a command,
//! or rewrite `:name:` tags into native emoji and repost the message through
//! the channel's proxy identity.
//!
//! # Example
//!
//! ```rust,ignore
//! use emojibot_bot::{RewritePipeline, RewriteSettings};
//! use std::sync::Arc;
//!
//! let pipeline = RewritePipeline::new(platform, store, builtins, RewriteSettings::default());
//! let outcome = pipeline.process(&message).await;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod commands;
mod listing;
mod locks;
mod pipeline;
mod settings;
mod tokens;
mod warnings;

pub use commands::Command;
pub use listing::paginate;
pub use locks::CommunityLocks;
pub use pipeline::{RewriteOutcome, RewritePipeline};
pub use settings::RewriteSettings;
pub use tokens::{Reference, rewrite_tags, scan};
pub use warnings::{CapacityWarning, capacity_warnings};
