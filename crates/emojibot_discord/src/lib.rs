//! Discord adapter for emojibot.
//!
//! Implements [`emojibot_core::EmojiPlatform`] with serenity's HTTP client and
//! runs the rewrite pipeline from a gateway event handler.
//!
//! - **platform**: guild emoji, message deletion, webhook reposts and notices
//! - **handler**: converts guild messages and hands them to the pipeline
//! - **proxies**: per-channel webhook cache with eviction on failed posts
//! - **client**: authenticates and owns the gateway connection

#![warn(missing_docs)]

mod client;
mod conversions;
mod error;
mod handler;
mod platform;
mod proxies;

pub use client::EmojiBot;
pub use conversions::{
    channel_id, guild_id, image_data_uri, incoming_message, is_processable, parse_snowflake,
};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::EmojiHandler;
pub use platform::DiscordPlatform;
pub use proxies::{CachedProxy, ProxyCache};
