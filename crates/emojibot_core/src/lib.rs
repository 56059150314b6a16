//! Core data model and policies for emojibot.
//!
//! emojibot lets a community register an unbounded catalog of named image
//! macros and keeps the most used ones resident in the platform's small set
//! of native emoji slots.
//!
//! # Components
//!
//! - [`Catalog`] / [`CatalogStore`]: the persisted per-community catalog,
//!   snapshotted to disk after every mutation
//! - [`BuiltinNames`]: read-only blocklist of platform builtin names
//! - [`FuzzyMatcher`]: normalized Levenshtein matching for misspelled references
//! - [`reconcile`]: top-N slot policy producing register/evict deltas
//! - [`NativeSlotIndex`]: name-indexed view of the platform's native emoji
//! - [`PendingUploads`]: volatile (user, channel) → name bindings
//! - [`EmojiPlatform`]: the narrow capability set consumed from the chat platform
//!
//! # Example
//!
//! ```
//! use emojibot_core::{CommunityCatalog, EmojiName, EmojiRecord, NativeSlotIndex, UserId, reconcile};
//!
//! let mut catalog = CommunityCatalog::default();
//! let party = EmojiName::parse_new("party").unwrap();
//! catalog.insert(party.clone(), EmojiRecord::new("http://x/img.png", UserId::from("1")));
//!
//! let delta = reconcile(&catalog, &NativeSlotIndex::default(), 1);
//! assert!(delta.to_register.contains(&party));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builtins;
mod catalog;
mod fuzzy;
mod ids;
mod imaging;
mod message;
mod pending;
mod platform;
mod reconcile;
mod slots;
mod store;

pub use builtins::BuiltinNames;
pub use catalog::{Catalog, CommunityCatalog, EmojiRecord};
pub use fuzzy::{FuzzyMatch, FuzzyMatcher, best_match, ratio};
pub use ids::{ChannelId, CommunityId, EmojiName, MessageId, UserId};
pub use imaging::{ImageFormat, validate_image};
pub use message::{
    Attachment, Author, AuthorBuilder, IncomingMessage, IncomingMessageBuilder, ProxyHandle,
};
pub use pending::PendingUploads;
pub use platform::{EmojiPlatform, PlatformResult};
pub use reconcile::{SlotDelta, frequent, reconcile};
pub use slots::{NativeEmoji, NativeHandle, NativeSlotIndex};
pub use store::CatalogStore;
