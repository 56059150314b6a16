//! Observed native emoji slots.

use crate::EmojiName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Platform handle of a native emoji.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct NativeHandle(pub String);

/// A native emoji as observed on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeEmoji {
    /// Handle used to delete it.
    pub handle: NativeHandle,
    /// Name as registered.
    pub name: String,
    /// Whether this bot registered it (and may evict it).
    pub managed: bool,
    /// Text that renders the emoji in a message, e.g. `<:party:123>`.
    pub markup: String,
}

/// Name-indexed view of a community's native emoji.
///
/// Lookups are case-insensitive. Built from one platform listing and kept
/// current by the caller as slots are registered or evicted.
#[derive(Debug, Clone, Default)]
pub struct NativeSlotIndex {
    by_name: BTreeMap<String, NativeEmoji>,
}

impl NativeSlotIndex {
    /// Index a platform listing.
    pub fn new(emojis: impl IntoIterator<Item = NativeEmoji>) -> Self {
        let mut index = Self::default();
        for emoji in emojis {
            index.insert(emoji);
        }
        index
    }

    /// Add or replace an emoji. A managed entry wins a name clash.
    pub fn insert(&mut self, emoji: NativeEmoji) {
        let key = emoji.name.to_lowercase();
        match self.by_name.get(&key) {
            Some(existing) if existing.managed && !emoji.managed => {}
            _ => {
                self.by_name.insert(key, emoji);
            }
        }
    }

    /// Drop an emoji by name.
    pub fn remove(&mut self, name: &EmojiName) -> Option<NativeEmoji> {
        self.by_name.remove(name.as_str())
    }

    /// Native emoji with this name.
    pub fn get(&self, name: &EmojiName) -> Option<&NativeEmoji> {
        self.by_name.get(name.as_str())
    }

    /// Whether a native emoji has this name.
    pub fn contains(&self, name: &EmojiName) -> bool {
        self.by_name.contains_key(name.as_str())
    }

    /// Slots in use.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no slot is in use.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Free slots under a platform capacity.
    pub fn free_slots(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.len())
    }

    /// Emoji this bot registered.
    pub fn managed(&self) -> impl Iterator<Item = &NativeEmoji> {
        self.by_name.values().filter(|e| e.managed)
    }
}
